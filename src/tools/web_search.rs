//! Web Search Tool (Tavily)
//!
//! Wraps the Tavily search API. On success the answer plus result snippets
//! are returned as one string; on any failure the result text is the fixed
//! `unavailable: <reason>` form with `success = false`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::Tool;
use crate::config::ToolsConfig;
use crate::types::{Result, ToolResult, TriageError};

const TOOL_NAME: &str = "web_search";
const API_URL: &str = "https://api.tavily.com/search";

/// Tavily web search adapter
pub struct WebSearchTool {
    api_key: SecretString,
    max_results: usize,
    client: reqwest::Client,
}

impl WebSearchTool {
    pub fn new(config: &ToolsConfig) -> Result<Self> {
        let api_key = config
            .tavily_api_key
            .clone()
            .or_else(|| std::env::var("TAVILY_API_KEY").ok())
            .ok_or_else(|| {
                TriageError::Config(
                    "Tavily API key not found. Set TAVILY_API_KEY env var or provide in config"
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TriageError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            max_results: config.max_results,
            client,
        })
    }

    async fn search(&self, query: &str) -> Result<String> {
        debug!("Web search: {}", query);

        let body = TavilyRequest {
            query: query.to_string(),
            max_results: self.max_results,
            include_answer: true,
            topic: "general".to_string(),
        };

        let response = self
            .client
            .post(API_URL)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| TriageError::tool(TOOL_NAME, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::tool(
                TOOL_NAME,
                format!("Tavily API error ({}): {}", status, body),
            ));
        }

        let response_body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| TriageError::tool(TOOL_NAME, format!("failed to parse response: {}", e)))?;

        Ok(format_results(&response_body))
    }
}

fn format_results(response: &TavilyResponse) -> String {
    let mut parts = Vec::new();

    if let Some(answer) = &response.answer {
        if !answer.trim().is_empty() {
            parts.push(answer.trim().to_string());
        }
    }

    for result in &response.results {
        parts.push(format!("{}: {}", result.title, result.content));
    }

    parts.join("\n")
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search the web when internal documents do not contain the answer"
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        match self.search(query).await {
            Ok(text) => ToolResult::ok(TOOL_NAME, text),
            Err(e) => {
                warn!("Web search unavailable: {}", e);
                ToolResult::failed(TOOL_NAME, format!("unavailable: {}", e))
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct TavilyRequest {
    query: String,
    max_results: usize,
    include_answer: bool,
    topic: String,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}
