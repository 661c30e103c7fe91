//! Recover step: classify a backend failure and convert or propagate it.

use super::RelayError;
use crate::ports::relay_logger::{FAILURE_CLASSIFIED, RelayEvent, RelayLogger};
use relay_domain::{BackendFailure, ClassifiedError, RecoveryResponse, TranslatedRequest};
use serde_json::json;
use tracing::{info, warn};

/// Classify `failure`; a tool validation failure becomes a recovery turn,
/// anything else becomes a [`RelayError`].
pub(super) fn recover(
    failure: BackendFailure,
    translated: &TranslatedRequest,
    logger: &dyn RelayLogger,
    request_id: &str,
) -> Result<RecoveryResponse, RelayError> {
    let classified = relay_domain::classify(&failure);
    let offending_tool = match &classified {
        ClassifiedError::ToolValidationFailure {
            offending_tool_name,
        } => offending_tool_name.clone(),
        ClassifiedError::GenericBackendFailure { .. } => None,
    };
    let recovery_triggered = classified.is_tool_validation();

    logger.log(RelayEvent::for_request(
        FAILURE_CLASSIFIED,
        request_id,
        json!({
            "classification": classified.tag(),
            "status_code": failure.status_code(),
            "offending_tool": offending_tool,
            "recovery_triggered": recovery_triggered,
        }),
    ));

    match relay_domain::resolve(classified, &translated.tool_set, &translated.model) {
        Ok(recovery) => {
            info!(
                request_id,
                offending_tool = recovery.offending_tool_name().unwrap_or("<unknown>"),
                "Converted tool validation failure into a recovery turn"
            );
            Ok(recovery)
        }
        Err(generic) => {
            warn!(
                request_id,
                classification = generic.tag(),
                "Propagating backend failure"
            );
            Err(RelayError::from(generic))
        }
    }
}
