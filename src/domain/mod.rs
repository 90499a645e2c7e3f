//! Domain Layer
//!
//! The core of Summon - no I/O, everything external goes through ports.
//!
//! ## Structure
//!
//! - `entities/` - SourceUnit, CompiledArtifact, CompileReport
//! - `value_objects/` - QualifiedName, ArtifactDigest, ProcessorSet, Limits
//! - `services/` - ProcessorDiscovery
//! - `policies/` - PrefixPolicy, FailureCache
//! - `ports/` - ArtifactStore, SourceRepository, CompilerBackend, NamespacePolicy, EventSink

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
