//! Port for structured request logging.
//!
//! Defines the [`RequestLogger`] trait for recording dispatch events
//! (incoming requests, tool resolutions, responses) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the dispatch
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured dispatch event for logging.
pub struct RequestEvent {
    /// Event type identifier (e.g., "dispatch_request", "tool_resolved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RequestEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging dispatch events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible so
/// logging failures never disturb request handling.
pub trait RequestLogger: Send + Sync {
    /// Record a dispatch event.
    fn log(&self, event: RequestEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRequestLogger;

impl RequestLogger for NoRequestLogger {
    fn log(&self, _event: RequestEvent) {}
}
