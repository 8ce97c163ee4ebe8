//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/triagent/) and project (.triagent/) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderConfig;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings
    pub llm: ProviderConfig,

    /// Vector store settings
    pub store: StoreConfig,

    /// Embedding endpoint used by the vector store
    pub embedding: EmbeddingConfig,

    /// External tool settings (web search)
    pub tools: ToolsConfig,

    /// Policy document source settings
    pub docs: DocsConfig,

    /// Guardrail settings
    pub guardrails: GuardrailSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: ProviderConfig::default(),
            store: StoreConfig::default(),
            embedding: EmbeddingConfig::default(),
            tools: ToolsConfig::default(),
            docs: DocsConfig::default(),
            guardrails: GuardrailSettings::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `TriageError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::TriageError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::TriageError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.store.top_k == 0 {
            return Err(crate::types::TriageError::Config(
                "store.top_k must be greater than 0".to_string(),
            ));
        }

        if self.tools.max_results == 0 {
            return Err(crate::types::TriageError::Config(
                "tools.max_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Vector Store Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Chroma server base URL
    pub base_url: String,

    /// Collection holding the internal policy documents
    pub collection: String,

    /// Top-k documents per similarity search
    pub top_k: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            collection: "support_policies".to_string(),
            top_k: crate::constants::RETRIEVAL_TOP_K,
        }
    }
}

// =============================================================================
// Embedding Configuration
// =============================================================================

/// OpenAI-compatible embeddings endpoint. Ollama exposes the same shape at
/// `/v1/embeddings`, so one section covers both.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// API base URL
    pub api_base: String,

    /// Embedding model name
    pub model: String,

    /// API key, never serialized to output
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// =============================================================================
// Tool Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Tavily API key, never serialized to output
    #[serde(skip_serializing)]
    pub tavily_api_key: Option<String>,

    /// Maximum web search results per query
    pub max_results: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            max_results: crate::constants::WEB_SEARCH_MAX_RESULTS,
        }
    }
}

impl std::fmt::Debug for ToolsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsConfig")
            .field(
                "tavily_api_key",
                &self.tavily_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_results", &self.max_results)
            .finish()
    }
}

// =============================================================================
// Document Source Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Google Docs API base URL
    pub api_base: String,

    /// Fixed document identifiers to search
    pub document_ids: Vec<String>,

    /// Read-only OAuth access token, never serialized to output
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            api_base: "https://docs.googleapis.com/v1".to_string(),
            document_ids: Vec::new(),
            access_token: None,
        }
    }
}

impl std::fmt::Debug for DocsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsConfig")
            .field("api_base", &self.api_base)
            .field("document_ids", &self.document_ids)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

// =============================================================================
// Guardrail Configuration
// =============================================================================

/// What to do when the safety judge cannot be constructed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailMode {
    /// Refuse to start without a working safety check
    #[default]
    Closed,
    /// Run with the post-check disabled (logged as a warning)
    Open,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailSettings {
    /// Case-insensitive substrings that short-circuit a request
    pub banned_terms: Vec<String>,

    /// Startup policy when the safety judge is unavailable
    pub fail_mode: FailMode,
}

impl Default for GuardrailSettings {
    fn default() -> Self {
        Self {
            banned_terms: vec![
                "hack".to_string(),
                "exploit".to_string(),
                "malware".to_string(),
            ],
            fail_mode: FailMode::Closed,
        }
    }
}
