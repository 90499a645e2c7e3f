//! CompilerBackend port - the external compiler
//!
//! The backend turns a batch of source units into artifacts. It may emit
//! artifacts for names beyond the ones submitted (several units defined in
//! one fetched source) and may read already-compiled artifacts through the
//! request's store view to link against them. It never fetches source itself.

use crate::domain::entities::{CompiledArtifact, SourceUnit};
use crate::domain::ports::ArtifactReader;
use crate::domain::value_objects::ProcessorSet;

/// One backend invocation
pub struct CompileRequest<'a> {
    /// Units to compile (already filtered, never empty)
    pub units: &'a [SourceUnit],
    /// Extension processors discovered for this invocation
    pub processors: &'a ProcessorSet,
    /// Previously compiled artifacts the backend may link against
    pub store: &'a dyn ArtifactReader,
}

/// Successful backend output
#[derive(Debug, Clone, Default)]
pub struct BackendOutput {
    pub artifacts: Vec<CompiledArtifact>,
    /// Warnings and notes; not interpreted
    pub diagnostics: Vec<String>,
}

/// Backend failure.
///
/// `partial` carries whatever the backend emitted before failing; the
/// orchestrator never stores it.
#[derive(Debug, Clone, Default, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
    pub diagnostics: Vec<String>,
    pub partial: Vec<CompiledArtifact>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<String>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_partial(mut self, partial: Vec<CompiledArtifact>) -> Self {
        self.partial = partial;
        self
    }
}

/// Compiler backend
pub trait CompilerBackend: Send + Sync {
    /// Backend name (for events)
    fn name(&self) -> &'static str;

    /// Compile one batch
    fn compile(&self, request: &CompileRequest<'_>) -> Result<BackendOutput, BackendError>;

    /// Whether two invocations may run at the same time.
    ///
    /// When false the orchestrator serializes invocations globally.
    fn supports_concurrent_invocation(&self) -> bool {
        false
    }
}
