//! WebSearch result interception.
//!
//! Some clients answer a `WebSearch` tool call with a placeholder or an
//! error string when they cannot run the search themselves. When the most
//! recent turn pair is exactly that, the relay runs the query through the
//! configured [`WebSearchPort`] and replaces the tool result content with
//! the search response. Tool declarations are never touched.

use crate::ports::relay_logger::{RelayEvent, RelayLogger, WEB_SEARCH_INTERCEPTED};
use crate::ports::web_search::WebSearchPort;
use relay_domain::{ContentBlock, MessageContent, MessagesRequest, Role, ToolResultContent};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Tool name whose results are eligible for interception.
pub const WEB_SEARCH_TOOL: &str = "WebSearch";

/// Substrings marking a tool result as a placeholder or a failed search.
const PLACEHOLDER_MARKERS: [&str; 3] = ["API Error", "Did 0 searches", "Web search results"];

struct PendingSearch {
    tool_use_id: String,
    input: Value,
}

#[derive(Clone)]
pub struct WebSearchInterceptor {
    search: Arc<dyn WebSearchPort>,
}

impl WebSearchInterceptor {
    pub fn new(search: Arc<dyn WebSearchPort>) -> Self {
        Self { search }
    }

    /// Replace placeholder WebSearch results in the last turn pair.
    ///
    /// Returns the number of tool results rewritten. A failed search is
    /// still written back, as an error object with an empty result list.
    pub async fn intercept(
        &self,
        request: &mut MessagesRequest,
        logger: &dyn RelayLogger,
        request_id: &str,
    ) -> usize {
        let pending = pending_searches(request);
        if pending.is_empty() {
            return 0;
        }

        let mut replacements = Vec::with_capacity(pending.len());
        for search in pending {
            info!(request_id, input = %search.input, "Running intercepted WebSearch");
            let (content, success) = match self.search.search(&search.input).await {
                Ok(results) => (results.to_string(), true),
                Err(e) => {
                    warn!(request_id, error = %e, "Intercepted WebSearch failed");
                    let body = json!({
                        "error": format!("Search failed: {}", e),
                        "results": [],
                    });
                    (body.to_string(), false)
                }
            };
            logger.log(RelayEvent::for_request(
                WEB_SEARCH_INTERCEPTED,
                request_id,
                json!({
                    "tool_use_id": search.tool_use_id,
                    "success": success,
                }),
            ));
            replacements.push((search.tool_use_id, content));
        }

        let count = replacements.len();
        if let Some(last) = request.messages.as_mut().and_then(|m| m.last_mut()) {
            for block in last.content.blocks_mut() {
                if let ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    ..
                } = block
                    && let Some((_, replacement)) =
                        replacements.iter().find(|(id, _)| id.as_str() == tool_use_id.as_str())
                {
                    *content = Some(ToolResultContent::Text(replacement.clone()));
                }
            }
        }
        count
    }
}

fn is_placeholder(content: Option<&ToolResultContent>) -> bool {
    match content {
        Some(ToolResultContent::Text(text)) => {
            PLACEHOLDER_MARKERS.iter().any(|marker| text.contains(marker))
        }
        _ => false,
    }
}

/// WebSearch calls in the second-to-last (assistant) message whose result
/// in the last (user) message is a placeholder.
fn pending_searches(request: &MessagesRequest) -> Vec<PendingSearch> {
    let [.., assistant, user] = request.message_list() else {
        return Vec::new();
    };
    if assistant.role != Role::Assistant || user.role != Role::User {
        return Vec::new();
    }
    let (MessageContent::Blocks(calls), MessageContent::Blocks(results)) =
        (&assistant.content, &user.content)
    else {
        return Vec::new();
    };

    calls
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } if name == WEB_SEARCH_TOOL => {
                Some((id, input))
            }
            _ => None,
        })
        .filter(|(id, _)| {
            results.iter().any(|block| {
                matches!(
                    block,
                    ContentBlock::ToolResult { tool_use_id, content, .. }
                        if tool_use_id == *id && is_placeholder(content.as_ref())
                )
            })
        })
        .map(|(id, input)| PendingSearch {
            tool_use_id: id.clone(),
            input: input.clone(),
        })
        .collect()
}
