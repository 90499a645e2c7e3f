//! Summon - on-demand fetch, compile and retry engine
//!
//! Summon answers "give me the compiled artifact for this qualified name".
//! A miss inside the remote-addressable namespace triggers exactly one fetch
//! of the unit's source and one compile of it, after which the artifact store
//! is consulted once more. Explicit compile batches skip units that are
//! already compiled, so recompiling a batch is free.
//!
//! The engine is safe to share between threads: concurrent lookups of the
//! same name share a single fetch and compile.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{Orchestrator, OrchestratorOptions, Resolution};
pub use config::{Config, ConfigError, ConfigWarning};
pub use domain::entities::{CompileReport, CompiledArtifact, SourceUnit};
pub use domain::policies::{FailureCache, PrefixPolicy};
pub use domain::ports::{
    ArtifactReader, ArtifactStore, BackendError, BackendOutput, CompileRequest, CompilerBackend,
    EngineEvent, EventSink, FetchError, NamespacePolicy, NoRemotePolicy, NoopEventSink,
    SourceRepository,
};
pub use domain::services::ProcessorDiscovery;
pub use domain::value_objects::{Capability, Limits, ProcessorSet, QualifiedName};
pub use error::{Operation, SummonError, SummonResult};
pub use infrastructure::{
    ArtifactDirectory, CommandBackend, CommandSpec, DirectorySourceRepository, JsonEventSink,
    MemoryArtifactStore, MemorySourceRepository,
};
