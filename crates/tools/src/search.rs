//! Search backend abstraction and the Tavily client.

use crate::error::ToolError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

pub const TAVILY_URL: &str = "https://api.tavily.com";

/// Per-run settings the search tool reads on every call.
pub trait SearchContext: Send + Sync {
    fn max_search_results(&self) -> usize;
}

/// Run configuration supplied by whatever dispatches the tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub max_search_results: usize,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            max_search_results: 10,
        }
    }
}

impl SearchContext for RunContext {
    fn max_search_results(&self) -> usize {
        self.max_search_results
    }
}

/// A hosted search service returning provider-defined JSON.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns `Ok(None)` when the backend yields nothing.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Option<serde_json::Value>, ToolError>;
}

/// Tavily search API client.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ToolError> {
        Self::with_base_url(api_key, TAVILY_URL)
    }

    /// Fails with [`ToolError::NotConfigured`] when the key is blank.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ToolError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ToolError::NotConfigured("Tavily API key is empty".into()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: SecretString::new(api_key),
        })
    }
}

#[async_trait]
impl SearchBackend for TavilyClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Option<serde_json::Value>, ToolError> {
        debug!("Performing Tavily search");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&TavilyRequest { query, max_results })
            .send()
            .await?;

        if response.status() == 429 {
            return Err(ToolError::RateLimit);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::ExternalService(format!(
                "Tavily API error: {} - {}",
                status, body
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let payload: serde_json::Value = serde_json::from_str(&body)?;
        match payload {
            serde_json::Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}
