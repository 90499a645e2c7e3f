//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_store;
pub mod compiler_backend;
pub mod engine_events;
pub mod namespace_policy;
pub mod source_repository;

pub use artifact_store::{ArtifactReader, ArtifactStore, PutOutcome, ReadOnlyStore};
pub use compiler_backend::{BackendError, BackendOutput, CompileRequest, CompilerBackend};
pub use engine_events::{EngineEvent, EventSink, NoopEventSink};
pub use namespace_policy::{NamespacePolicy, NoRemotePolicy};
pub use source_repository::{FetchError, SourceRepository};
