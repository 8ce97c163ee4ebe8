//! Policy Document Tool
//!
//! Wraps the Google Docs policy searcher. The three search outcomes map onto
//! a `ToolResult`: found excerpts become a successful result, a readable but
//! unmatched corpus becomes a successful empty result, and a fetch failure
//! becomes an unsuccessful result with the reason.

use async_trait::async_trait;
use tracing::warn;

use super::Tool;
use crate::gdocs::{DocSearchOutcome, PolicyDocSearcher};
use crate::types::ToolResult;

const TOOL_NAME: &str = "policy_docs";

/// Relevance search over configured policy documents.
pub struct PolicyDocTool {
    searcher: PolicyDocSearcher,
}

impl PolicyDocTool {
    pub fn new(searcher: PolicyDocSearcher) -> Self {
        Self { searcher }
    }
}

#[async_trait]
impl Tool for PolicyDocTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search company policy documents for relevant excerpts"
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        match self.searcher.search(query).await {
            DocSearchOutcome::Found(excerpts) => ToolResult::ok(TOOL_NAME, excerpts),
            DocSearchOutcome::NotFound => ToolResult::ok(TOOL_NAME, String::new()),
            DocSearchOutcome::Failed(reason) => {
                warn!("Policy document search failed: {}", reason);
                ToolResult::failed(TOOL_NAME, format!("unavailable: {}", reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_mapping() {
        // NotFound and Failed must stay distinguishable through the mapping
        let found = DocSearchOutcome::Found("excerpt".to_string());
        let not_found = DocSearchOutcome::NotFound;
        let failed = DocSearchOutcome::Failed("timeout".to_string());

        assert!(found.is_found());
        assert!(!not_found.is_found());
        assert!(!failed.is_found());
        assert_ne!(not_found, failed);
    }
}
