//! Query Router
//!
//! Classifies each incoming query into exactly one of the topical labels via
//! a single LLM call. The router fails open: an unrecognized response or a
//! provider error produces an `IT` decision instead of an error, with the
//! reason recorded in `RoutingDecision::detail`. Routing never blocks a query.

use tracing::{debug, warn};

use crate::llm::{ChatRequest, SharedProvider};
use crate::types::{RouteLabel, RoutingDecision};

const CLASSIFICATION_PROMPT: &str = "\
You are a support query classifier. Classify the user's query into exactly one category.

Categories:
- IT: technical support, software, hardware, accounts, passwords, VPN, email, devices
- FINANCE: payroll, expenses, reimbursements, invoices, budgets, purchasing
- IRRELEVANT: anything unrelated to IT or finance support

Respond with the category name only: IT, FINANCE, or IRRELEVANT. No other text.";

/// Classifies queries into support domains. Holds a shared provider handle;
/// one instance serves all requests.
pub struct Router {
    provider: SharedProvider,
}

impl Router {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Classify one query. Always returns a decision.
    pub async fn route(&self, query: &str) -> RoutingDecision {
        let request = ChatRequest::single_turn(CLASSIFICATION_PROMPT, query);

        match self.provider.complete(&request).await {
            Ok(completion) => {
                let raw = completion.text;
                match RouteLabel::parse(&raw) {
                    Some(label) => {
                        debug!("Routed to {}", label);
                        RoutingDecision::new(query, label)
                    }
                    None => {
                        warn!("Unrecognized classifier response, defaulting to IT: {:?}", raw);
                        RoutingDecision::new(query, RouteLabel::It)
                            .with_detail(format!("unrecognized label: {}", raw.trim()))
                    }
                }
            }
            Err(e) => {
                warn!("Classification call failed, defaulting to IT: {}", e);
                RoutingDecision::new(query, RouteLabel::It)
                    .with_detail(format!("classifier error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, LlmProvider};
    use crate::types::{Result, TriageError};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockProvider {
        response: std::result::Result<String, String>,
    }

    impl MockProvider {
        fn replying(text: &str) -> SharedProvider {
            Arc::new(Self {
                response: Ok(text.to_string()),
            })
        }

        fn failing(message: &str) -> SharedProvider {
            Arc::new(Self {
                response: Err(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn complete(&self, _request: &ChatRequest) -> Result<Completion> {
            match &self.response {
                Ok(text) => Ok(Completion::text_only(text.clone())),
                Err(message) => Err(TriageError::LlmApi(message.clone())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_routes_recognized_labels() {
        let router = Router::new(MockProvider::replying("FINANCE"));
        let decision = router.route("how do I file an expense report?").await;
        assert_eq!(decision.label, RouteLabel::Finance);
        assert!(decision.detail.is_none());
    }

    #[tokio::test]
    async fn test_normalizes_classifier_response() {
        let router = Router::new(MockProvider::replying("  irrelevant\n"));
        let decision = router.route("what is the meaning of life?").await;
        assert_eq!(decision.label, RouteLabel::Irrelevant);
        assert!(decision.detail.is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_label_fails_open_to_it() {
        let router = Router::new(MockProvider::replying("IT department, probably"));
        let decision = router.route("my laptop won't boot").await;
        assert_eq!(decision.label, RouteLabel::It);
        assert!(decision.detail.as_deref().unwrap().contains("unrecognized"));
    }

    #[tokio::test]
    async fn test_provider_error_fails_open_to_it() {
        let router = Router::new(MockProvider::failing("rate limited"));
        let decision = router.route("reset my password").await;
        assert_eq!(decision.label, RouteLabel::It);
        assert!(decision.detail.as_deref().unwrap().contains("rate limited"));
    }
}
