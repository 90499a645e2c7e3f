//! ArtifactStore port - the compiled-unit store
//!
//! The single source of truth for "has this name already been compiled".
//! Entries are append-only for the lifetime of the process: once a name is
//! stored it never disappears and never changes payload.

use crate::domain::entities::CompiledArtifact;
use crate::domain::value_objects::QualifiedName;
use crate::error::SummonResult;

/// Outcome of a successful `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// Name was not stored before
    Inserted,
    /// Name was already stored with an identical payload
    Unchanged,
}

/// Read-only view handed to compiler backends
pub trait ArtifactReader: Send + Sync {
    /// True iff an artifact for `name` is stored. No side effects.
    fn exists(&self, name: &QualifiedName) -> bool;

    /// Stored artifact, if any. Never triggers a fetch or compile.
    fn read(&self, name: &QualifiedName) -> Option<CompiledArtifact>;

    /// Every stored artifact, in name order
    fn snapshot(&self) -> Vec<CompiledArtifact>;
}

/// Read-only view over a full store, for handing to backends
pub struct ReadOnlyStore<'a>(pub &'a dyn ArtifactStore);

impl ArtifactReader for ReadOnlyStore<'_> {
    fn exists(&self, name: &QualifiedName) -> bool {
        self.0.exists(name)
    }

    fn read(&self, name: &QualifiedName) -> Option<CompiledArtifact> {
        self.0.read(name)
    }

    fn snapshot(&self) -> Vec<CompiledArtifact> {
        self.0.snapshot()
    }
}

/// Compiled-unit store
pub trait ArtifactStore: ArtifactReader {
    /// Record one artifact.
    ///
    /// Identical payload for a stored name is `Unchanged`; a differing payload
    /// is a `SummonError::Consistency` and the stored artifact is kept.
    fn put(&self, artifact: CompiledArtifact) -> SummonResult<PutOutcome>;

    /// Record a batch atomically: either every artifact is accepted or none is.
    ///
    /// Returns the names that were newly inserted.
    fn put_all(&self, artifacts: Vec<CompiledArtifact>) -> SummonResult<Vec<QualifiedName>>;

    /// Number of stored artifacts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
