//! Relay parameters - per-request behavior knobs.
//!
//! [`RelayParams`] groups the static parameters the relay use cases need.
//! They come from the file/env configuration and are fixed for the
//! lifetime of the process.

use relay_domain::ModelMap;
use std::time::Duration;

/// Token budget used by connectivity probes.
pub const PROBE_MAX_TOKENS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RelayParams {
    /// Upper bound on a single backend call; on expiry the call is dropped.
    pub request_timeout: Duration,
    /// Ceiling applied to the client's `max_tokens`.
    pub max_tokens_limit: u32,
    /// Client model → backend model mapping.
    pub models: ModelMap,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(90),
            max_tokens_limit: 4096,
            models: ModelMap::default(),
        }
    }
}

impl RelayParams {
    // ==================== Builder Methods ====================

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_tokens_limit(mut self, limit: u32) -> Self {
        self.max_tokens_limit = limit;
        self
    }

    pub fn with_models(mut self, models: ModelMap) -> Self {
        self.models = models;
        self
    }
}
