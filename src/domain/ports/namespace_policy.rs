//! NamespacePolicy port - which names may be fetched on a miss

use crate::domain::value_objects::QualifiedName;

/// Pure predicate supplied at construction time.
///
/// Names outside the remote-addressable namespace (platform or standard
/// library names, for instance) simply report absent on a miss.
pub trait NamespacePolicy: Send + Sync {
    fn is_remote_addressable(&self, name: &QualifiedName) -> bool;
}

impl<F> NamespacePolicy for F
where
    F: Fn(&QualifiedName) -> bool + Send + Sync,
{
    fn is_remote_addressable(&self, name: &QualifiedName) -> bool {
        self(name)
    }
}

/// Policy that never allows a fetch (pure cache mode)
pub struct NoRemotePolicy;

impl NamespacePolicy for NoRemotePolicy {
    fn is_remote_addressable(&self, _name: &QualifiedName) -> bool {
        false
    }
}
