//! Token counting for `/v1/messages/count_tokens`.

use relay_domain::MessagesRequest;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub input_tokens: u32,
}

/// Estimate the input tokens of `request` without contacting the backend.
pub fn count_tokens(request: &MessagesRequest) -> TokenCount {
    TokenCount {
        input_tokens: request.estimate_input_tokens(),
    }
}
