//! Exa search adapter.
//!
//! Maps a `WebSearch` tool input onto Exa's `/search` endpoint and returns
//! the raw JSON response for the relay to place into the tool result.
//!
//! | WebSearch input    | Exa parameter    |
//! |--------------------|------------------|
//! | `query`            | `query`          |
//! | `allowed_domains`  | `includeDomains` |
//! | `blocked_domains`  | `excludeDomains` |

use async_trait::async_trait;
use relay_application::ports::web_search::{SearchError, WebSearchPort};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub const EXA_BASE_URL: &str = "https://api.exa.ai";

/// Exa only returns pages crawled after this date.
const START_CRAWL_DATE: &str = "2024-01-01";

pub struct ExaSearchAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    num_results: u32,
}

impl ExaSearchAdapter {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        num_results: u32,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            num_results,
        })
    }

    /// Exa request body for a WebSearch tool input.
    pub fn search_params(&self, input: &Value) -> Value {
        let query = input.get("query").and_then(Value::as_str).unwrap_or_default();
        let mut params = json!({
            "query": query,
            "type": "auto",
            "numResults": self.num_results,
            "contents": {
                "text": {"maxCharacters": 2000},
                "highlights": {"numSentences": 2},
                "summary": {"query": query},
            },
            "startCrawlDate": START_CRAWL_DATE,
        });
        for (from, to) in [
            ("allowed_domains", "includeDomains"),
            ("blocked_domains", "excludeDomains"),
        ] {
            if let Some(domains) = input.get(from).and_then(Value::as_array)
                && !domains.is_empty()
            {
                params[to] = Value::Array(domains.clone());
            }
        }
        params
    }
}

#[async_trait]
impl WebSearchPort for ExaSearchAdapter {
    async fn search(&self, input: &Value) -> Result<Value, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::NotConfigured("Exa API key is empty".to_string()));
        }

        let params = self.search_params(input);
        debug!(query = %params["query"], "Calling Exa search");

        let response = self
            .client
            .post(format!("{}/search", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .json(&params)
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(format!("invalid search response: {}", e)))
    }
}
