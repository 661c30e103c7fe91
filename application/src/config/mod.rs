//! Application-level configuration.
//!
//! - [`RelayParams`] - timeout, token ceiling and model mapping used by
//!   the relay use cases

pub mod relay_params;

pub use relay_params::{PROBE_MAX_TOKENS, RelayParams};
