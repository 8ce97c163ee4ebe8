//! Chroma HTTP Adapter
//!
//! Talks to a Chroma server over its REST API. Queries are embedded through
//! the injected `Embedder` before being sent; Chroma itself only sees
//! vectors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{Document, DocumentStore};
use crate::config::StoreConfig;
use crate::llm::SharedEmbedder;
use crate::types::{Result, TriageError};

/// Chroma vector store adapter
pub struct ChromaStore {
    base_url: String,
    collection: String,
    embedder: SharedEmbedder,
    client: reqwest::Client,
}

impl ChromaStore {
    pub fn new(config: &StoreConfig, embedder: SharedEmbedder) -> Result<Self> {
        let mut base_url = config.base_url.clone();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TriageError::Store(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            collection: config.collection.clone(),
            embedder,
            client,
        })
    }

    fn collection_url(&self, operation: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, self.collection, operation
        )
    }
}

#[async_trait]
impl DocumentStore for ChromaStore {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let embedding = self.embedder.embed(query).await?;

        debug!(
            "Querying Chroma collection '{}' for top {}",
            self.collection, k
        );

        let body = QueryRequest {
            query_embeddings: vec![embedding],
            n_results: k,
            include: vec!["documents".to_string()],
        };

        let response = self
            .client
            .post(self.collection_url("query"))
            .json(&body)
            .send()
            .await
            .map_err(|e| TriageError::Store(format!("Chroma query failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Store(format!(
                "Chroma query error ({}): {}",
                status, body
            )));
        }

        let response_body: QueryResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Store(format!("Failed to parse Chroma response: {}", e)))?;

        // One query in, one result row out
        let ids = response_body.ids.into_iter().next().unwrap_or_default();
        let documents = response_body
            .documents
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(ids
            .into_iter()
            .zip(documents)
            .filter_map(|(id, content)| content.map(|c| Document::new(id, c)))
            .collect())
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut embeddings = Vec::with_capacity(documents.len());
        for document in &documents {
            embeddings.push(self.embedder.embed(&document.content).await?);
        }

        let body = AddRequest {
            ids: documents.iter().map(|d| d.id.clone()).collect(),
            documents: documents.iter().map(|d| d.content.clone()).collect(),
            embeddings,
        };

        let response = self
            .client
            .post(self.collection_url("add"))
            .json(&body)
            .send()
            .await
            .map_err(|e| TriageError::Store(format!("Chroma add failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Store(format!(
                "Chroma add error ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/v1/heartbeat", self.base_url);

        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => Ok(true),
            Ok(resp) => {
                warn!("Chroma heartbeat failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Chroma not reachable: {}", e);
                Ok(false)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct QueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Serialize)]
struct AddRequest {
    ids: Vec<String>,
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}
