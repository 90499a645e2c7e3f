//! Artifact Digest Value Object
//!
//! A SHA-256 fingerprint of an artifact payload.
//! Used by the store to tell an idempotent re-put from a conflicting one.

use std::fmt;

use sha2::{Digest, Sha256};

/// Artifact digest value object
///
/// Displays as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactDigest(String);

impl ArtifactDigest {
    /// Prefix for SHA-256 digests
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the digest of a payload
    pub fn of(payload: &[u8]) -> Self {
        let hash = Sha256::digest(payload);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Get the full digest string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First 12 hex characters, enough for log lines
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for ArtifactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArtifactDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
