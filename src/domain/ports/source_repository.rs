//! SourceRepository port - remote source lookup
//!
//! Only consulted for remote-addressable names. Implementations fetch source
//! text and nothing else: they never compile and never cache.

use crate::domain::entities::SourceUnit;
use crate::domain::value_objects::QualifiedName;

/// Source fetch errors (not-found is `Ok(None)`, not an error)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid source for '{name}': {message}")]
    InvalidSource { name: QualifiedName, message: String },
}

/// Abstract source repository
pub trait SourceRepository: Send + Sync {
    /// Repository name (for events)
    fn name(&self) -> &'static str;

    /// Fetch the source for `name`.
    ///
    /// `Ok(None)` means the repository does not know the name.
    fn fetch(&self, name: &QualifiedName) -> Result<Option<SourceUnit>, FetchError>;
}
