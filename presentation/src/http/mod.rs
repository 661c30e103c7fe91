//! HTTP surface: Anthropic Messages API in front of the relay use cases.
//!
//! | Route                            | Auth | Handler                        |
//! |----------------------------------|:----:|--------------------------------|
//! | `POST /v1/messages`              | yes  | [`handlers::create_message`]   |
//! | `POST /v1/messages/count_tokens` | yes  | [`handlers::count_tokens`]     |
//! | `GET /health`                    |      | [`handlers::health`]           |
//! | `GET /test-connection`           |      | [`handlers::test_connection`]  |
//! | `GET /`                          |      | [`handlers::root`]             |
//!
//! A client that disconnects mid-request drops the handler future, which
//! drops the pending backend call with it.

mod auth;
pub mod error;
pub mod handlers;
mod state;

pub use error::ApiError;
pub use state::{AppState, ServiceInfo};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/messages", post(handlers::create_message))
        .route("/v1/messages/count_tokens", post(handlers::count_tokens))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_client_key,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/test-connection", get(handlers::test_connection))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use relay_application::{
        CompletionBackend, ProbeBackendUseCase, RelayMessageUseCase, RelayParams,
    };
    use relay_domain::{
        BackendFailure, ChatCompletion, FinishReason, ModelMap, TranslatedRequest, Usage,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct StubBackend(Result<ChatCompletion, BackendFailure>);

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(
            &self,
            _request: &TranslatedRequest,
        ) -> Result<ChatCompletion, BackendFailure> {
            self.0.clone()
        }
    }

    fn ok_backend() -> StubBackend {
        StubBackend(Ok(ChatCompletion::single_text(
            "chatcmpl-1",
            1_700_000_000,
            "gpt-4o",
            "Hello from the backend",
            FinishReason::Stop,
            Usage::new(20, 5),
        )))
    }

    fn app_with(backend: StubBackend, client_key: Option<&str>) -> Router {
        let backend: Arc<dyn CompletionBackend> = Arc::new(backend);
        let params = RelayParams::default();
        let info = ServiceInfo {
            backend_base_url: "https://api.openai.com/v1".into(),
            backend_api_key_configured: true,
            models: ModelMap::default(),
            max_tokens_limit: params.max_tokens_limit,
            request_timeout_secs: params.request_timeout.as_secs(),
            web_search_enabled: false,
        };
        let state = AppState::new(
            RelayMessageUseCase::new(backend.clone(), &params),
            ProbeBackendUseCase::new(backend, &params),
            info,
        )
        .with_client_api_key(client_key.map(str::to_string));
        router(Arc::new(state))
    }

    fn messages_body() -> Value {
        json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 512,
            "messages": [{"role": "user", "content": "List the files"}],
            "tools": [
                {"name": "Read", "description": "Read a file", "input_schema": {"type": "object"}},
                {"name": "Glob", "input_schema": {"type": "object"}}
            ]
        })
    }

    fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_messages_success() {
        let response = app_with(ok_backend(), None)
            .oneshot(post("/v1/messages", &messages_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(handlers::REQUEST_ID_HEADER));
        assert!(!response.headers().contains_key(handlers::RECOVERED_HEADER));
        let body = json_body(response).await;
        assert_eq!(body["type"], "message");
        assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(body["stop_reason"], "end_turn");
        assert_eq!(body["content"][0]["text"], "Hello from the backend");
        assert_eq!(body["usage"]["output_tokens"], 5);
    }

    #[tokio::test]
    async fn test_tool_validation_failure_returns_recovery_turn() {
        let backend = StubBackend(Err(BackendFailure::from_status(
            400,
            "Tool call validation failed: attempted to call tool 'Task' which was not in request.tools",
        )));
        let response = app_with(backend, None)
            .oneshot(post("/v1/messages", &messages_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[handlers::RECOVERED_HEADER], "true");
        let body = json_body(response).await;
        assert_eq!(body["stop_reason"], "end_turn");
        let text = body["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("'Task'"));
        assert!(text.contains("Read, Glob"));
    }

    #[tokio::test]
    async fn test_generic_backend_failure_passes_status_through() {
        let backend = StubBackend(Err(BackendFailure::from_status(
            429,
            r#"{"error":{"code":"rate_limit_exceeded"}}"#,
        )));
        let response = app_with(backend, None)
            .oneshot(post("/v1/messages", &messages_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = json_body(response).await;
        assert_eq!(body["type"], "error");
        assert_eq!(body["error"]["type"], "api_error");
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Rate limit"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_invalid_request_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app_with(ok_backend(), None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_streaming_is_rejected() {
        let mut body = messages_body();
        body["stream"] = json!(true);
        let response = app_with(ok_backend(), None)
            .oneshot(post("/v1/messages", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_client_key_required_when_configured() {
        let app = app_with(ok_backend(), Some("client-secret"));

        let missing = app
            .clone()
            .oneshot(post("/v1/messages", &messages_body()))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(missing).await["error"]["type"], "authentication_error");

        let mut with_header = post("/v1/messages", &messages_body());
        with_header
            .headers_mut()
            .insert("x-api-key", "client-secret".parse().unwrap());
        assert_eq!(app.clone().oneshot(with_header).await.unwrap().status(), StatusCode::OK);

        let mut with_bearer = post("/v1/messages/count_tokens", &messages_body());
        with_bearer
            .headers_mut()
            .insert(header::AUTHORIZATION, "Bearer client-secret".parse().unwrap());
        assert_eq!(app.clone().oneshot(with_bearer).await.unwrap().status(), StatusCode::OK);

        // Health stays open
        assert_eq!(app.oneshot(get("/health")).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_count_tokens() {
        let response = app_with(ok_backend(), None)
            .oneshot(post("/v1/messages/count_tokens", &messages_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // "List the files" is 14 chars
        assert_eq!(json_body(response).await["input_tokens"], 3);
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let app = app_with(ok_backend(), None);

        let health = json_body(app.clone().oneshot(get("/health")).await.unwrap()).await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["client_api_key_validation"], false);

        let root = json_body(app.oneshot(get("/")).await.unwrap()).await;
        assert_eq!(root["status"], "running");
        assert_eq!(root["config"]["small_model"], "gpt-4o-mini");
        assert_eq!(root["endpoints"]["messages"], "/v1/messages");
    }

    #[tokio::test]
    async fn test_connection_probe() {
        let ok = app_with(ok_backend(), None)
            .oneshot(get("/test-connection"))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(json_body(ok).await["response_id"], "chatcmpl-1");

        let failing = StubBackend(Err(BackendFailure::transport("connection refused")));
        let failed = app_with(failing, None)
            .oneshot(get("/test-connection"))
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(failed).await;
        assert_eq!(body["status"], "failed");
        assert!(body["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
