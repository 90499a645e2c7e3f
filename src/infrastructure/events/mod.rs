//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation

mod json;

pub use json::JsonEventSink;
