//! Engine Event Port
//!
//! Provides an observable interface for resolve and compile operations.
//! Enables NDJSON event streams and debugging without tying the core to any
//! particular output.

use crate::domain::value_objects::QualifiedName;
use crate::error::Operation;

/// Event emitted by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Lookup served from the store
    CacheHit { name: QualifiedName },

    /// Lookup missed the store
    CacheMiss {
        name: QualifiedName,
        remote_addressable: bool,
    },

    /// Caller attached to another caller's in-flight attempt
    Joined { name: QualifiedName },

    /// A remembered failure was returned without fetching
    NegativeHit { name: QualifiedName },

    FetchStarted {
        name: QualifiedName,
        repository: &'static str,
    },

    /// Fetch finished; `found` is false when the repository does not know the name
    Fetched { name: QualifiedName, found: bool },

    FetchFailed { name: QualifiedName, error: String },

    /// Every unit of a batch was already compiled
    CompileSkipped { requested: usize },

    CompileStarted {
        backend: &'static str,
        units: Vec<QualifiedName>,
        skipped: usize,
        processors: usize,
    },

    Compiled {
        units: Vec<QualifiedName>,
        produced: Vec<QualifiedName>,
    },

    CompileFailed {
        units: Vec<QualifiedName>,
        error: String,
        discarded: usize,
    },

    TimedOut {
        operation: Operation,
        name: Option<QualifiedName>,
    },
}

/// Trait for receiving engine events
///
/// Implementations can be:
/// - JsonEventSink: NDJSON event stream
/// - NoopEventSink: Silent operation
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: EngineEvent);

    /// Whether this sink wants per-lookup events (cache hits and misses).
    ///
    /// Hot lookups skip building those events when false.
    fn wants_lookup_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn on_event(&self, _event: EngineEvent) {}

    fn wants_lookup_events(&self) -> bool {
        false
    }
}
