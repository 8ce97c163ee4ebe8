//! Vector Store Abstraction
//!
//! The store is an externally-managed collaborator exposing exactly two
//! capabilities: top-k similarity search and document add. One trait, one
//! adapter per backing store; no runtime probing of retriever interfaces.

mod chroma;

pub use chroma::ChromaStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::Result;

/// A retrieved document chunk with its source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Shared store handle injected into the doc-search tool.
pub type SharedStore = Arc<dyn DocumentStore + Send + Sync>;

/// The retrieval interface: fetch top-k documents for a query, add documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the top-k most similar documents for a query.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>>;

    /// Add documents to the collection.
    async fn add_documents(&self, documents: Vec<Document>) -> Result<()>;

    /// Check if the store is reachable.
    async fn health_check(&self) -> Result<bool>;
}
