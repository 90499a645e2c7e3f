//! SourceUnit entity - a named, textual compilation input
//!
//! Source units are created by callers or by a source repository on a cache
//! miss, consumed by exactly one compile batch, and dropped afterwards.

use std::sync::Arc;

use crate::domain::value_objects::{Origin, QualifiedName};

/// A compilation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Globally unique key
    name: QualifiedName,
    /// Source text, shared so batches can be cloned into worker threads cheaply
    text: Arc<str>,
    /// Local submission or remote fetch
    origin: Origin,
}

impl SourceUnit {
    /// Create a caller-submitted unit
    pub fn local(name: QualifiedName, text: impl Into<Arc<str>>) -> Self {
        Self {
            name,
            text: text.into(),
            origin: Origin::Local,
        }
    }

    /// Create a unit fetched from a remote repository
    pub fn remote(name: QualifiedName, text: impl Into<Arc<str>>) -> Self {
        Self {
            name,
            text: text.into(),
            origin: Origin::Remote,
        }
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}
