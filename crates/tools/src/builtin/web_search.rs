//! Web search tool backed by a hosted search API.

use crate::error::ToolError;
use crate::search::{SearchBackend, SearchContext};
use crate::types::{FunctionDefinition, Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Web search tool returning the backend's raw result payload.
pub struct WebSearchTool {
    backend: Arc<dyn SearchBackend>,
    context: Arc<dyn SearchContext>,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

impl WebSearchTool {
    /// Create a search tool. The result limit is read from `context` on every call.
    pub fn new(backend: Arc<dyn SearchBackend>, context: Arc<dyn SearchContext>) -> Self {
        Self { backend, context }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".into(),
            function: FunctionDefinition {
                name: "web_search".into(),
                description: "Search for general web results. Useful for answering questions about current events.".into(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query (e.g., 'latest news about AI')"
                        }
                    },
                    "required": ["query"]
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "web_search"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: SearchArgs = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if args.query.trim().is_empty() {
            return Err(ToolError::InvalidArguments("Empty query".into()));
        }

        let max_results = self.context.max_search_results();
        debug!(query = %args.query, max_results, "Performing web search");

        let payload = self.backend.search(&args.query, max_results).await?;

        Ok(serde_json::to_string(&payload)?)
    }
}
