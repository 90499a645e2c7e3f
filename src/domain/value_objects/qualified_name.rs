//! Qualified Name Value Object
//!
//! The globally unique key of a compilation unit or artifact.
//! Validated once on construction so every layer can rely on:
//! - Non-empty
//! - No whitespace or control characters
//! - No empty or traversal (`..`) segments

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error when a qualified name fails validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("qualified name is empty")]
    Empty,

    #[error("qualified name '{name}' contains invalid character {ch:?}")]
    InvalidCharacter { name: String, ch: char },

    #[error("qualified name '{name}' contains an empty or traversal segment")]
    InvalidSegment { name: String },
}

/// A validated qualified name such as `remote/algo/Sort` or `remote.algo.Sort`.
///
/// Both `/` and `.` separate segments. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(Arc<str>);

impl QualifiedName {
    /// Separators accepted between segments
    pub const SEPARATORS: [char; 2] = ['/', '.'];

    /// Validate and build a qualified name
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }

        if let Some(ch) = raw.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(NameError::InvalidCharacter {
                name: raw.to_string(),
                ch,
            });
        }

        // `..` splits into empty segments, so traversal is caught here too
        if raw.split(Self::SEPARATORS).any(str::is_empty) {
            return Err(NameError::InvalidSegment {
                name: raw.to_string(),
            });
        }

        Ok(Self(Arc::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments split on either separator
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATORS)
    }

    /// Check whether this name lives under `prefix` (plain string prefix)
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for QualifiedName {
    type Error = NameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = NameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QualifiedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
