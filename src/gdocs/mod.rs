//! Policy Document Connector (Google Docs)
//!
//! Fetches fixed documents by identifier over the Docs REST API, flattens
//! the nested paragraph/run structure to plain text, and answers queries via
//! the keyword relevance scorer.
//!
//! The search has three distinguishable outcomes: `Found` with ranked
//! excerpts, `NotFound` when no sentence scored above zero, and `Failed`
//! when the underlying fetch raised. Callers must never have to parse a
//! string to tell these apart.

pub mod relevance;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DocsConfig;
use crate::constants::MAX_EXCERPTS;
use crate::types::{Result, TriageError};

// =============================================================================
// Search Outcome
// =============================================================================

/// The three visible states of a policy document search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSearchOutcome {
    /// Ranked excerpts, newline-joined, at most `MAX_EXCERPTS` sentences
    Found(String),
    /// The corpus was readable but nothing matched
    NotFound,
    /// Fetch or transport failure, with detail
    Failed(String),
}

impl DocSearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

// =============================================================================
// Docs Client
// =============================================================================

/// Read-only Google Docs fetcher.
pub struct GoogleDocsClient {
    api_base: String,
    access_token: SecretString,
    client: reqwest::Client,
}

impl GoogleDocsClient {
    pub fn new(config: &DocsConfig) -> Result<Self> {
        let token = config
            .access_token
            .clone()
            .or_else(|| std::env::var("GOOGLE_DOCS_TOKEN").ok())
            .ok_or_else(|| {
                TriageError::Config(
                    "Google Docs access token not found. Set GOOGLE_DOCS_TOKEN env var or provide in config"
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TriageError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base: config.api_base.clone(),
            access_token: SecretString::from(token),
            client,
        })
    }

    /// Fetch one document and flatten it to plain text.
    pub async fn fetch_text(&self, document_id: &str) -> Result<String> {
        debug!("Fetching document {}", document_id);

        let url = format!("{}/documents/{}", self.api_base, document_id);
        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| TriageError::tool("doc_search", format!("Docs fetch failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::tool(
                "doc_search",
                format!("Docs API error ({}): {}", status, body),
            ));
        }

        let document: DocsDocument = response.json().await.map_err(|e| {
            TriageError::tool("doc_search", format!("Failed to parse document: {}", e))
        })?;

        Ok(flatten_document(&document))
    }
}

/// Flatten the nested paragraph/run structure to plain text.
fn flatten_document(document: &DocsDocument) -> String {
    let mut text = String::new();

    for element in &document.body.content {
        let Some(paragraph) = &element.paragraph else {
            continue;
        };
        for el in &paragraph.elements {
            if let Some(run) = &el.text_run {
                text.push_str(&run.content);
            }
        }
    }

    text
}

// =============================================================================
// Policy Searcher
// =============================================================================

/// Relevance search over the configured policy documents.
pub struct PolicyDocSearcher {
    client: GoogleDocsClient,
    document_ids: Vec<String>,
}

impl PolicyDocSearcher {
    pub fn new(client: GoogleDocsClient, document_ids: Vec<String>) -> Self {
        Self {
            client,
            document_ids,
        }
    }

    /// Fetch all configured documents and return the ranked excerpts.
    ///
    /// Transport failures surface as `Failed`, never as a panic or a raised
    /// error; the caller treats the outcome as data.
    pub async fn search(&self, query: &str) -> DocSearchOutcome {
        if self.document_ids.is_empty() {
            return DocSearchOutcome::Failed("No document IDs configured".to_string());
        }

        let mut texts = Vec::new();
        for document_id in &self.document_ids {
            match self.client.fetch_text(document_id).await {
                Ok(text) if !text.trim().is_empty() => texts.push(text),
                Ok(_) => {}
                Err(e) => {
                    warn!("Document fetch failed for {}: {}", document_id, e);
                    return DocSearchOutcome::Failed(e.to_string());
                }
            }
        }

        search_corpus(query, &texts)
    }
}

/// Rank every sentence in the corpus against the query. Split out from the
/// fetch path so it can be exercised without a live Docs endpoint.
pub fn search_corpus(query: &str, texts: &[String]) -> DocSearchOutcome {
    if texts.is_empty() {
        return DocSearchOutcome::NotFound;
    }

    let mut sentences = Vec::new();
    for text in texts {
        sentences.extend(relevance::split_sentences(text));
    }

    let ranked = relevance::rank(query, &sentences);
    if ranked.is_empty() {
        return DocSearchOutcome::NotFound;
    }

    let joined = ranked
        .iter()
        .take(MAX_EXCERPTS)
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    DocSearchOutcome::Found(joined)
}

// =============================================================================
// Wire types (Docs REST API)
// =============================================================================

#[derive(Debug, Deserialize)]
struct DocsDocument {
    #[serde(default)]
    body: DocsBody,
}

#[derive(Debug, Default, Deserialize)]
struct DocsBody {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
struct StructuralElement {
    #[serde(default)]
    paragraph: Option<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    #[serde(default)]
    elements: Vec<ParagraphElement>,
}

#[derive(Debug, Deserialize)]
struct ParagraphElement {
    #[serde(rename = "textRun", default)]
    text_run: Option<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_corpus_found() {
        let texts = vec![
            "Reset your password via the portal. Contact finance for payroll help.".to_string(),
        ];
        let outcome = search_corpus("password reset", &texts);
        assert_eq!(
            outcome,
            DocSearchOutcome::Found("Reset your password via the portal.".to_string())
        );
    }

    #[test]
    fn test_search_corpus_empty_is_not_found() {
        assert_eq!(search_corpus("password", &[]), DocSearchOutcome::NotFound);
    }

    #[test]
    fn test_search_corpus_zero_overlap_is_not_found() {
        let texts = vec!["Office plants need watering.".to_string()];
        assert_eq!(
            search_corpus("password reset", &texts),
            DocSearchOutcome::NotFound
        );
    }

    #[test]
    fn test_not_found_distinct_from_failed() {
        let not_found = search_corpus("password", &[]);
        let failed = DocSearchOutcome::Failed("connection refused".to_string());
        assert_ne!(not_found, failed);
        assert!(!failed.is_found());
    }

    #[test]
    fn test_flatten_document() {
        let raw = serde_json::json!({
            "body": {
                "content": [
                    {"sectionBreak": {}},
                    {"paragraph": {"elements": [
                        {"textRun": {"content": "Hello "}},
                        {"textRun": {"content": "world.\n"}}
                    ]}},
                    {"paragraph": {"elements": [
                        {"inlineObjectElement": {}},
                        {"textRun": {"content": "Second paragraph."}}
                    ]}}
                ]
            }
        });
        let document: DocsDocument = serde_json::from_value(raw).expect("parse");
        assert_eq!(
            flatten_document(&document),
            "Hello world.\nSecond paragraph."
        );
    }
}
