//! Backend failure capture and classification.
//!
//! ```text
//! BackendFailure ──▶ classify() ──▶ ClassifiedError
//!  (verbatim body,     (pure,          ├─ ToolValidationFailure { offending_tool_name }
//!   status, kind)       total)         └─ GenericBackendFailure { kind, status_code, raw_message }
//! ```
//!
//! Classification is a pure function of the captured failure: no I/O, no
//! logging, same input gives the same output. Each recognised failure
//! pattern lives in its own matcher in [`classifier`] so it can be tested
//! against literal backend strings.

pub mod backend_failure;
pub mod classifier;
pub mod hint;

pub use backend_failure::{BackendFailure, FailureKind, TIMEOUT_STATUS, TRANSPORT_STATUS};
pub use classifier::{ClassifiedError, ToolValidationMatcher, classify};
pub use hint::friendly_message;
