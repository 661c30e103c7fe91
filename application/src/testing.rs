//! In-memory port fakes shared by the use case tests.

use crate::ports::completion_backend::CompletionBackend;
use crate::ports::relay_logger::{RelayEvent, RelayLogger};
use crate::ports::web_search::{SearchError, WebSearchPort};
use async_trait::async_trait;
use relay_domain::{
    BackendFailure, ChatCompletion, InboundMessage, MessagesRequest, ToolDeclaration,
    TranslatedRequest,
};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A request with one user turn and the given tool declarations.
pub fn tool_request(names: &[&str]) -> MessagesRequest {
    MessagesRequest {
        model: Some("claude-3-5-sonnet-20241022".to_string()),
        max_tokens: Some(256),
        messages: Some(vec![InboundMessage::user("hi")]),
        tools: Some(
            names
                .iter()
                .map(|name| ToolDeclaration {
                    name: name.to_string(),
                    description: Some(format!("{name} tool")),
                    input_schema: json!({"type": "object", "properties": {}}),
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// Backend that replays a fixed script of results, optionally after a delay.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<ChatCompletion, BackendFailure>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    last_request: Mutex<Option<TranslatedRequest>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<ChatCompletion, BackendFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            delay: None,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TranslatedRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &TranslatedRequest) -> Result<ChatCompletion, BackendFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendFailure::transport("script exhausted")));
        self.completed.fetch_add(1, Ordering::SeqCst);
        next
    }
}

/// Logger that keeps every event in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingLogger {
    pub fn has_event(&self, event_type: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(t, _)| *t == event_type)
    }

    pub fn events(&self, event_type: &str) -> Vec<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl RelayLogger for RecordingLogger {
    fn log(&self, event: RelayEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

/// Search port returning a canned response or a canned error.
pub struct FakeSearch {
    response: Result<Value, String>,
    queries: Mutex<Vec<Value>>,
}

impl FakeSearch {
    pub fn ok(response: Value) -> Self {
        Self {
            response: Ok(response),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<Value> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearchPort for FakeSearch {
    async fn search(&self, input: &Value) -> Result<Value, SearchError> {
        self.queries.lock().unwrap().push(input.clone());
        self.response
            .clone()
            .map_err(SearchError::RequestFailed)
    }
}
