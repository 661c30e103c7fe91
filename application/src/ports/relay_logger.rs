//! Relay event records.
//!
//! Every request leaves a short trail of machine-readable events keyed by
//! its request id. Reading them back answers two questions: which tools
//! actually went downstream, and what the relay did when the backend
//! refused a turn.
//!
//! | Event | Payload |
//! |-------|---------|
//! | [`TOOL_SET_PREPARED`] | `model`, `backend_model`, `tool_count`, `tools` |
//! | [`UNKNOWN_TOOL_REFERENCES`] | `tools` named in history but not declared |
//! | [`BACKEND_RESPONSE`] | `success`, then `usage` or `kind`/`status_code` |
//! | [`FAILURE_CLASSIFIED`] | `classification`, `offending_tool`, `recovery_triggered` |
//! | [`WEB_SEARCH_INTERCEPTED`] | `tool_use_id`, `success` |
//!
//! Operator diagnostics go through `tracing`; these records are the audit
//! trail.

use serde_json::{Map, Value};

pub const TOOL_SET_PREPARED: &str = "tool_set_prepared";
pub const UNKNOWN_TOOL_REFERENCES: &str = "unknown_tool_references";
pub const BACKEND_RESPONSE: &str = "backend_response";
pub const FAILURE_CLASSIFIED: &str = "failure_classified";
pub const WEB_SEARCH_INTERCEPTED: &str = "web_search_intercepted";

/// One audit record: an event name plus its JSON payload.
#[derive(Debug, Clone)]
pub struct RelayEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl RelayEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// An event tagged with the request it belongs to.
    ///
    /// `request_id` is written first in the payload object; a non-object
    /// payload is kept under `data`.
    pub fn for_request(event_type: &'static str, request_id: &str, payload: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("request_id".to_string(), Value::from(request_id));
        match payload {
            Value::Object(map) => fields.extend(map),
            other => {
                fields.insert("data".to_string(), other);
            }
        }
        Self::new(event_type, Value::Object(fields))
    }

    pub fn request_id(&self) -> Option<&str> {
        self.payload.get("request_id").and_then(Value::as_str)
    }
}

/// Sink for relay events.
///
/// Called on the request path, so `log` must hand the record off and
/// return. A sink that cannot write drops the record.
pub trait RelayLogger: Send + Sync {
    fn log(&self, event: RelayEvent);
}

/// Discards every event. Used when no event log is configured.
pub struct NoRelayLogger;

impl RelayLogger for NoRelayLogger {
    fn log(&self, _event: RelayEvent) {}
}
