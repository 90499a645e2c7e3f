//! CompiledArtifact entity - a named binary output of compilation
//!
//! Artifacts are produced only by a successful backend invocation and are
//! immutable once stored. A backend may emit artifacts for names nobody asked
//! for (units pulled in transitively from the same source).

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::value_objects::{ArtifactDigest, Capability, QualifiedName};

/// A compiled artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    name: QualifiedName,
    payload: Arc<[u8]>,
    capabilities: BTreeSet<Capability>,
}

impl CompiledArtifact {
    pub fn new(name: QualifiedName, payload: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name,
            payload: payload.into(),
            capabilities: BTreeSet::new(),
        }
    }

    /// Attach a capability marker
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Shared handle to the payload bytes
    pub fn shared_payload(&self) -> Arc<[u8]> {
        Arc::clone(&self.payload)
    }

    pub fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    /// Whether the backend can load this artifact as an extension processor
    pub fn is_processor(&self) -> bool {
        self.capabilities.iter().any(Capability::is_processor)
    }

    /// SHA-256 of the payload
    pub fn digest(&self) -> ArtifactDigest {
        ArtifactDigest::of(&self.payload)
    }

    /// Same payload bytes as `other`
    pub fn same_payload(&self, other: &CompiledArtifact) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload) || self.payload == other.payload
    }
}
