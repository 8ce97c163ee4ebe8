//! Embedding Adapter
//!
//! The vector store needs query embeddings; this is the one place that
//! produces them. The adapter speaks the OpenAI `/v1/embeddings` shape,
//! which Ollama also exposes, so one implementation covers both backends.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::types::{ErrorClassifier, Result, TriageError};

/// Shared embedder handle for the vector store adapter.
pub type SharedEmbedder = Arc<dyn Embedder + Send + Sync>;

/// Turns text into a dense vector for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// OpenAI-compatible embeddings endpoint adapter
pub struct OpenAiEmbedder {
    api_key: Option<SecretString>,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .map(SecretString::from);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| TriageError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            client,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Embedding {} chars with model {}", text.len(), self.model);

        let url = format!("{}/embeddings", self.api_base);
        let body = EmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = request.send().await.map_err(|e| {
            TriageError::Llm(ErrorClassifier::classify(
                &format!("Embedding request failed: {}", e),
                "embeddings",
            ))
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Llm(ErrorClassifier::classify_http_status(
                status,
                &format!("Embedding API error: {}", body),
                "embeddings",
            )));
        }

        let response_body: EmbeddingResponse = response.json().await.map_err(|e| {
            TriageError::LlmApi(format!("Failed to parse embedding response: {}", e))
        })?;

        response_body
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| TriageError::LlmApi("Empty embedding response".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
