//! Logging infrastructure - structured relay event logging.
//!
//! Provides [`JsonlRelayLogger`], a JSONL file writer that implements
//! the [`RelayLogger`](relay_application::RelayLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlRelayLogger;
