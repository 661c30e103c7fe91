//! Client API key check for the `/v1` routes.

use super::error::ApiError;
use super::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

/// Key presented via `x-api-key`, or else `Authorization: Bearer <key>`.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(key);
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Reject requests whose key does not match the configured client key.
///
/// Passes everything through when no client key is configured.
pub async fn require_client_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.client_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    match presented_key(request.headers()) {
        Some(key) if key == expected => Ok(next.run(request).await),
        presented => {
            warn!(
                path = %request.uri().path(),
                key_present = presented.is_some(),
                "Rejecting request with missing or invalid client API key"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_presented_key_prefers_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("from-header"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(presented_key(&headers), Some("from-header"));
    }

    #[test]
    fn test_presented_key_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer sk-abc"));
        assert_eq!(presented_key(&headers), Some("sk-abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        assert_eq!(presented_key(&headers), None);
    }
}
