//! Event Sink Implementations
//!
//! Provides concrete implementations of PushEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The human-readable console sink lives with the binary's UI.

mod json;

pub use json::JsonEventSink;
