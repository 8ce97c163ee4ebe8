//! Triagent - Multi-Agent Corporate Support Triage
//!
//! Answers IT and finance support questions by routing each query to a
//! topical specialist that works through internal document retrieval, policy
//! documents, and web search, wrapped in input/output guardrails.
//!
//! ## Pipeline
//!
//! ```text
//! query -> guardrail pre-check -> router -> specialist (IT | finance)
//!       -> guardrail post-check -> answer
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use triagent::config::ConfigLoader;
//! use triagent::engine::AgentEngine;
//!
//! let config = ConfigLoader::load()?;
//! let engine = AgentEngine::from_config(&config).await?;
//! let response = engine.handle("how do I reset my password?").await?;
//! println!("{}", response.response_text);
//! ```
//!
//! ## Modules
//!
//! - [`llm`]: provider abstraction (OpenAI, Bedrock, Ollama) and embeddings
//! - [`router`]: query classification with a fail-open default
//! - [`specialist`]: topical steps with ordered tool use
//! - [`tools`]: internal search, policy documents, web search adapters
//! - [`gdocs`]: Google Docs connector and keyword relevance scorer
//! - [`guardrails`]: banned-term pre-check and SAFE/UNSAFE post-check
//! - [`engine`]: the wired pipeline

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod gdocs;
pub mod guardrails;
pub mod llm;
pub mod router;
pub mod specialist;
pub mod store;
pub mod tools;
pub mod types;
pub mod workflow;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, LlmError, Result, TriageError};

// Domain Types
pub use types::{AgentResponse, RouteLabel, RoutingDecision, ToolResult, Transcript};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use engine::AgentEngine;
pub use guardrails::{Guardrails, PreCheck};
pub use router::Router;
pub use specialist::{SpecialistAgent, SpecialistDomain};
pub use workflow::{next_state, WorkflowState};

// =============================================================================
// Provider Re-exports
// =============================================================================

pub use llm::{
    create_provider, BedrockProvider, ChatRequest, Completion, LlmProvider, OllamaProvider,
    OpenAiProvider, SharedProvider,
};
pub use store::{ChromaStore, Document, DocumentStore, SharedStore};
