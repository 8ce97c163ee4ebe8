//! Tool Adapters
//!
//! Each tool wraps one external capability behind a uniform seam. Failures
//! never escape a tool as errors: they come back as a `ToolResult` with
//! `success = false` so the specialist can fold them into its reasoning or
//! ignore them.

mod doc_search;
mod policy_docs;
mod web_search;

pub use doc_search::DocSearchTool;
pub use policy_docs::PolicyDocTool;
pub use web_search::WebSearchTool;

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::ToolResult;

/// Shared tool handle held by a specialist's fixed tool list.
pub type SharedTool = Arc<dyn Tool + Send + Sync>;

/// A named external capability invocable during response generation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable tool name used in transcripts and logs
    fn name(&self) -> &str;

    /// One-line description of when to use this tool
    fn description(&self) -> &str;

    /// Invoke the tool once. Single attempt; failures are data.
    async fn invoke(&self, query: &str) -> ToolResult;
}
