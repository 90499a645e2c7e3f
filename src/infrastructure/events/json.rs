//! JSON Event Sink
//!
//! Outputs engine events as NDJSON for CI/automation consumption.

use crate::domain::ports::{EngineEvent, EventSink};
use crate::domain::value_objects::QualifiedName;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    lookups: bool,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stderr
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            lookups: true,
        }
    }

    /// Skip cache hit/miss events
    pub fn without_lookups(mut self) -> Self {
        self.lookups = false;
        self
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn names(names: &[QualifiedName]) -> Vec<&str> {
    names.iter().map(QualifiedName::as_str).collect()
}

impl EventSink for JsonEventSink {
    fn on_event(&self, event: EngineEvent) {
        let json = match event {
            EngineEvent::CacheHit { name } => {
                serde_json::json!({
                    "event": "cache_hit",
                    "name": name.as_str(),
                })
            }

            EngineEvent::CacheMiss {
                name,
                remote_addressable,
            } => {
                serde_json::json!({
                    "event": "cache_miss",
                    "name": name.as_str(),
                    "remote": remote_addressable,
                })
            }

            EngineEvent::Joined { name } => {
                serde_json::json!({
                    "event": "joined",
                    "name": name.as_str(),
                })
            }

            EngineEvent::NegativeHit { name } => {
                serde_json::json!({
                    "event": "negative_hit",
                    "name": name.as_str(),
                })
            }

            EngineEvent::FetchStarted { name, repository } => {
                serde_json::json!({
                    "event": "fetch_start",
                    "name": name.as_str(),
                    "repository": repository,
                })
            }

            EngineEvent::Fetched { name, found } => {
                serde_json::json!({
                    "event": "fetched",
                    "name": name.as_str(),
                    "found": found,
                })
            }

            EngineEvent::FetchFailed { name, error } => {
                serde_json::json!({
                    "event": "fetch_error",
                    "name": name.as_str(),
                    "error": error,
                })
            }

            EngineEvent::CompileSkipped { requested } => {
                serde_json::json!({
                    "event": "compile_skipped",
                    "requested": requested,
                })
            }

            EngineEvent::CompileStarted {
                backend,
                units,
                skipped,
                processors,
            } => {
                serde_json::json!({
                    "event": "compile_start",
                    "backend": backend,
                    "units": names(&units),
                    "skipped": skipped,
                    "processors": processors,
                })
            }

            EngineEvent::Compiled { units, produced } => {
                serde_json::json!({
                    "event": "compiled",
                    "units": names(&units),
                    "produced": names(&produced),
                })
            }

            EngineEvent::CompileFailed {
                units,
                error,
                discarded,
            } => {
                serde_json::json!({
                    "event": "compile_error",
                    "units": names(&units),
                    "error": error,
                    "discarded": discarded,
                })
            }

            EngineEvent::TimedOut { operation, name } => {
                serde_json::json!({
                    "event": "timeout",
                    "operation": operation.to_string(),
                    "name": name.as_ref().map(QualifiedName::as_str),
                })
            }
        };

        self.write_event(json);
    }

    fn wants_lookup_events(&self) -> bool {
        self.lookups
    }
}
