//! Normalize step: build the backend request and record its tool set.

use crate::ports::relay_logger::{
    RelayEvent, RelayLogger, TOOL_SET_PREPARED, UNKNOWN_TOOL_REFERENCES,
};
use relay_domain::{DomainError, MessagesRequest, RequestNormalizer, TranslatedRequest};
use serde_json::json;
use tracing::{debug, warn};

/// Translate `request` and emit the tool-set log events.
///
/// History references to tools outside the outgoing set are reported but
/// left in place; the request is forwarded as received.
pub(super) fn normalize_request(
    normalizer: &RequestNormalizer,
    request: &MessagesRequest,
    logger: &dyn RelayLogger,
    request_id: &str,
) -> Result<TranslatedRequest, DomainError> {
    let translated = match normalizer.normalize(request) {
        Ok(t) => t,
        Err(e) => {
            warn!(request_id, error = %e, "Rejecting inbound request");
            return Err(e);
        }
    };

    let names = translated.tool_set.names();
    debug!(
        request_id,
        backend_model = %translated.model,
        tool_count = names.len(),
        tools = ?names,
        "Prepared backend tool set"
    );
    logger.log(RelayEvent::for_request(
        TOOL_SET_PREPARED,
        request_id,
        json!({
            "model": request.model,
            "backend_model": translated.model,
            "tool_count": names.len(),
            "tools": names,
        }),
    ));

    let unknown = translated
        .tool_set
        .unknown_names(request.referenced_tool_names());
    if !unknown.is_empty() {
        warn!(
            request_id,
            unknown = ?unknown,
            "Conversation history references tools that are not declared in this request"
        );
        logger.log(RelayEvent::for_request(
            UNKNOWN_TOOL_REFERENCES,
            request_id,
            json!({
                "tools": unknown,
            }),
        ));
    }

    Ok(translated)
}
