//! Error types for Summon
//!
//! Library errors use `thiserror`. `SummonError` is `Clone` so a single
//! in-flight outcome can be handed to every caller waiting on it.

use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::{ArtifactDigest, QualifiedName};

/// Result type alias for Summon operations
pub type SummonResult<T> = Result<T, SummonError>;

/// The slow operations the orchestrator bounds and reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Compile,
    /// Waiting on another caller's in-flight attempt
    Wait,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Fetch => write!(f, "fetch"),
            Operation::Compile => write!(f, "compile"),
            Operation::Wait => write!(f, "wait"),
        }
    }
}

/// Main error type for Summon operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummonError {
    /// Source for a remote-addressable name could not be fetched
    #[error("failed to resolve source for '{name}': {message}")]
    Resolution { name: QualifiedName, message: String },

    /// Backend reported failure; names every unit of the caller's batch
    #[error("compilation failed for [{}]: {message}", join_names(.units))]
    Compile {
        units: Vec<QualifiedName>,
        message: String,
        diagnostics: Vec<String>,
    },

    /// A stored artifact would have been replaced by different bytes
    #[error("artifact '{name}' is already stored as {existing}, refusing {incoming}")]
    Consistency {
        name: QualifiedName,
        existing: ArtifactDigest,
        incoming: ArtifactDigest,
    },

    /// Caller-supplied limit exceeded; nothing was stored
    #[error("{operation} timed out after {timeout:?}")]
    TimedOut {
        operation: Operation,
        timeout: Duration,
    },

    /// The worker or in-flight leader went away without a result
    #[error("{operation} was abandoned before producing a result")]
    Abandoned { operation: Operation },
}

impl SummonError {
    /// Timeouts are a cancellation outcome rather than a failure of the unit
    pub fn is_timeout(&self) -> bool {
        matches!(self, SummonError::TimedOut { .. })
    }

    /// Internal invariant violations
    pub fn is_consistency(&self) -> bool {
        matches!(self, SummonError::Consistency { .. })
    }
}

fn join_names(names: &[QualifiedName]) -> String {
    names
        .iter()
        .map(QualifiedName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
