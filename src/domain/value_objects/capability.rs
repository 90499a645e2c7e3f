//! Capability value object - what a compiled artifact declares it can do
//!
//! The core only interprets `ExtensionProcessor`; other markers are carried
//! through untouched for backends that understand them.

use serde::{Deserialize, Serialize};

/// A capability marker declared by the backend for an artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// The artifact can be loaded by the backend as a compile-time extension processor
    ExtensionProcessor,
    /// Backend-specific marker
    Custom(String),
}

impl Capability {
    pub fn is_processor(&self) -> bool {
        matches!(self, Capability::ExtensionProcessor)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::ExtensionProcessor => write!(f, "extension-processor"),
            Capability::Custom(marker) => write!(f, "{}", marker),
        }
    }
}
