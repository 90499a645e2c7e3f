//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod capability;
mod digest;
mod limits;
mod origin;
mod processor_set;
mod qualified_name;

pub use capability::Capability;
pub use digest::ArtifactDigest;
pub use limits::Limits;
pub use origin::Origin;
pub use processor_set::ProcessorSet;
pub use qualified_name::{NameError, QualifiedName};
