//! Processor Set value object
//!
//! The identifiers of compile-time extension processors handed to a backend
//! invocation. Ordered so the rendered option value is deterministic.

use std::collections::BTreeSet;

/// Set of processor identifiers for one backend invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessorSet(BTreeSet<String>);

impl ProcessorSet {
    /// Separator used when rendering the option value
    pub const SEPARATOR: &'static str = ",";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Render as the backend's option value (`a,b,c`), or `None` when empty
    pub fn option_value(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.iter().collect::<Vec<_>>().join(Self::SEPARATOR))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ProcessorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ProcessorSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
