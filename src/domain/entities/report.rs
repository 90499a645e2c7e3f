//! CompileReport - the outcome of a successful compile call

use crate::domain::value_objects::QualifiedName;

/// Summary of a successful `compile` call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileReport {
    /// Every unit in the caller's batch, in submission order
    pub requested: Vec<QualifiedName>,
    /// Units skipped because they were already compiled
    pub skipped: Vec<QualifiedName>,
    /// Units that were compiled by another in-flight batch while we waited
    pub joined: Vec<QualifiedName>,
    /// Units this call handed to the backend
    pub submitted: Vec<QualifiedName>,
    /// Artifacts newly stored by this call (may include unrequested names)
    pub produced: Vec<QualifiedName>,
}

impl CompileReport {
    /// True when the backend was not invoked
    pub fn is_noop(&self) -> bool {
        self.submitted.is_empty()
    }
}
