//! Prefix Policy
//!
//! Namespace policy built from name prefixes: a name is remote-addressable
//! when it starts with one of the remote prefixes and none of the platform
//! prefixes. Platform prefixes win so standard-library names can never
//! trigger a fetch even when they overlap a remote prefix.

use crate::domain::ports::NamespacePolicy;
use crate::domain::value_objects::QualifiedName;

/// Prefix-based namespace policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefixPolicy {
    remote: Vec<String>,
    platform: Vec<String>,
}

impl PrefixPolicy {
    pub fn new<I, S>(remote: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remote: remote.into_iter().map(Into::into).collect(),
            platform: Vec::new(),
        }
    }

    /// Exclude names under these prefixes from fetching
    pub fn excluding<I, S>(mut self, platform: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platform.extend(platform.into_iter().map(Into::into));
        self
    }

    pub fn remote_prefixes(&self) -> &[String] {
        &self.remote
    }

    pub fn platform_prefixes(&self) -> &[String] {
        &self.platform
    }
}

impl NamespacePolicy for PrefixPolicy {
    fn is_remote_addressable(&self, name: &QualifiedName) -> bool {
        if self.platform.iter().any(|p| name.starts_with(p)) {
            return false;
        }
        self.remote.iter().any(|p| name.starts_with(p))
    }
}
