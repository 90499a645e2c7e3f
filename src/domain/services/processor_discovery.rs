//! Processor Discovery Service
//!
//! Finds the compile-time extension processors available right now: the
//! built-in identifiers supplied at construction plus every stored artifact
//! that carries the `ExtensionProcessor` capability.
//!
//! The set is recomputed for every backend invocation because a batch can
//! itself compile new processors.

use crate::domain::ports::ArtifactReader;
use crate::domain::value_objects::ProcessorSet;

/// Processor discovery
#[derive(Debug, Clone, Default)]
pub struct ProcessorDiscovery {
    builtin: ProcessorSet,
}

impl ProcessorDiscovery {
    /// Discovery with no built-in processors
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovery that always offers `builtin` in addition to stored processors
    pub fn with_builtin<I, S>(builtin: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            builtin: builtin.into_iter().collect(),
        }
    }

    pub fn builtin(&self) -> &ProcessorSet {
        &self.builtin
    }

    /// Processors usable by the next backend invocation. May be empty.
    pub fn available_processors(&self, store: &dyn ArtifactReader) -> ProcessorSet {
        let mut set = self.builtin.clone();
        set.extend(
            store
                .snapshot()
                .into_iter()
                .filter(|artifact| artifact.is_processor())
                .map(|artifact| artifact.name().to_string()),
        );
        set
    }
}
