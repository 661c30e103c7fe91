//! Route handlers.

use super::error::ApiError;
use super::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use relay_application::count_tokens as estimate;
use relay_domain::MessagesRequest;
use serde_json::json;
use std::sync::Arc;

/// Correlates a response with the relay's logs and event records.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Present (`true`) when the response is a synthesized recovery turn.
pub const RECOVERED_HEADER: &str = "x-relay-recovered";

/// POST /v1/messages
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessagesRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let outcome = state.relay.execute(request).await?;

    let mut response = Json(outcome.response).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&outcome.request_id) {
        headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    if outcome.recovered {
        headers.insert(
            HeaderName::from_static(RECOVERED_HEADER),
            HeaderValue::from_static("true"),
        );
    }
    Ok(response)
}

/// POST /v1/messages/count_tokens
pub async fn count_tokens(
    payload: Result<Json<MessagesRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    Ok(Json(estimate(&request)).into_response())
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "backend_api_key_configured": state.info.backend_api_key_configured,
        "client_api_key_validation": state.client_auth_enabled(),
    }))
}

/// GET /test-connection
///
/// Sends a five-token request to the small model.
pub async fn test_connection(State(state): State<Arc<AppState>>) -> Response {
    match state.probe.execute().await {
        Ok(report) => Json(json!({
            "status": "success",
            "message": "Successfully connected to the backend API",
            "model_used": report.model,
            "timestamp": Utc::now().to_rfc3339(),
            "response_id": report.response_id,
        }))
        .into_response(),
        Err(failure) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "failed",
                "error_type": "API Error",
                "message": failure.hint,
                "status_code": failure.failure.status_code(),
                "timestamp": Utc::now().to_rfc3339(),
                "suggestions": [
                    "Check that the backend API key is set and valid",
                    "Verify the backend base_url and network connectivity",
                    "Confirm the small_model is available on the backend",
                ],
            })),
        )
            .into_response(),
    }
}

/// GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let info = &state.info;
    Json(json!({
        "message": format!("tool-relay v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "config": {
            "backend_base_url": info.backend_base_url,
            "backend_api_key_configured": info.backend_api_key_configured,
            "max_tokens_limit": info.max_tokens_limit,
            "request_timeout_secs": info.request_timeout_secs,
            "big_model": info.models.big_model,
            "middle_model": info.models.middle_model,
            "small_model": info.models.small_model,
            "client_api_key_validation": state.client_auth_enabled(),
            "web_search_interception": info.web_search_enabled,
        },
        "endpoints": {
            "messages": "/v1/messages",
            "count_tokens": "/v1/messages/count_tokens",
            "health": "/health",
            "test_connection": "/test-connection",
        },
    }))
}
