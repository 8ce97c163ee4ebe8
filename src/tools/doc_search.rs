//! Internal Document Search Tool
//!
//! Wraps the vector store's similarity search. An empty result set is a
//! successful, empty `ToolResult` - the specialist decides what emptiness
//! means, not the tool.

use async_trait::async_trait;
use tracing::warn;

use super::Tool;
use crate::store::SharedStore;
use crate::types::ToolResult;

const TOOL_NAME: &str = "internal_search";

/// Internal company document retrieval over the vector store.
pub struct DocSearchTool {
    store: SharedStore,
    top_k: usize,
}

impl DocSearchTool {
    pub fn new(store: SharedStore, top_k: usize) -> Self {
        Self { store, top_k }
    }
}

#[async_trait]
impl Tool for DocSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search internal company documents such as policies, guides, and procedures"
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        match self.store.similarity_search(query, self.top_k).await {
            Ok(documents) => {
                let text = documents
                    .iter()
                    .map(|d| d.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                ToolResult::ok(TOOL_NAME, text)
            }
            Err(e) => {
                warn!("Internal search failed: {}", e);
                ToolResult::failed(TOOL_NAME, format!("unavailable: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, DocumentStore};
    use crate::types::{Result, TriageError};
    use std::sync::Arc;

    struct FixedStore {
        documents: Vec<Document>,
        fail: bool,
    }

    #[async_trait]
    impl DocumentStore for FixedStore {
        async fn similarity_search(&self, _query: &str, k: usize) -> Result<Vec<Document>> {
            if self.fail {
                return Err(TriageError::Store("connection refused".to_string()));
            }
            Ok(self.documents.iter().take(k).cloned().collect())
        }

        async fn add_documents(&self, _documents: Vec<Document>) -> Result<()> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(!self.fail)
        }
    }

    #[tokio::test]
    async fn test_joins_retrieved_documents() {
        let store = Arc::new(FixedStore {
            documents: vec![
                Document::new("1", "VPN policy text."),
                Document::new("2", "Password policy text."),
            ],
            fail: false,
        });
        let tool = DocSearchTool::new(store, 4);

        let result = tool.invoke("vpn").await;
        assert!(result.success);
        assert_eq!(result.text, "VPN policy text.\nPassword policy text.");
    }

    #[tokio::test]
    async fn test_empty_result_is_success() {
        let store = Arc::new(FixedStore {
            documents: vec![],
            fail: false,
        });
        let tool = DocSearchTool::new(store, 4);

        let result = tool.invoke("vpn").await;
        assert!(result.success);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_marked_unavailable() {
        let store = Arc::new(FixedStore {
            documents: vec![],
            fail: true,
        });
        let tool = DocSearchTool::new(store, 4);

        let result = tool.invoke("vpn").await;
        assert!(!result.success);
        assert!(result.text.starts_with("unavailable:"));
    }
}
