//! Origin value object - where a source unit came from

use serde::{Deserialize, Serialize};

/// Declared origin of a source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Submitted by a caller that already had the source in hand
    #[default]
    Local,
    /// Fetched from a remote source repository on a cache miss
    Remote,
}

impl Origin {
    pub fn is_remote(&self) -> bool {
        matches!(self, Origin::Remote)
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Local => write!(f, "local"),
            Origin::Remote => write!(f, "remote"),
        }
    }
}
