//! Agent Engine
//!
//! Owns the wired pipeline for one process: guardrail pre-check, router,
//! workflow dispatch, specialist step, guardrail post-check. All
//! collaborators are injected as shared handles at construction; nothing is a
//! process-wide singleton and no state survives a request.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::IRRELEVANT_ANSWER;
use crate::guardrails::{Guardrails, PreCheck};
use crate::llm::{create_provider, OpenAiEmbedder, SharedProvider};
use crate::router::Router;
use crate::specialist::{SpecialistAgent, SpecialistDomain};
use crate::gdocs::{GoogleDocsClient, PolicyDocSearcher};
use crate::store::{ChromaStore, SharedStore};
use crate::tools::{DocSearchTool, PolicyDocTool, SharedTool, WebSearchTool};
use crate::types::{AgentResponse, Result, RouteLabel};
use crate::workflow::{next_state, WorkflowState};

/// The wired triage pipeline.
pub struct AgentEngine {
    guardrails: Guardrails,
    router: Router,
    it_specialist: SpecialistAgent,
    finance_specialist: SpecialistAgent,
}

impl AgentEngine {
    /// Construct every collaborator from configuration and wire the pipeline.
    ///
    /// Missing web search credentials degrade to internal-search-only
    /// specialists; a missing provider key or a failed guardrail setup under
    /// `fail_mode = "closed"` is fatal.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.llm)?;
        info!(
            "Provider ready: {} ({})",
            provider.name(),
            provider.model()
        );

        let embedder = Arc::new(OpenAiEmbedder::new(&config.embedding)?);
        let store: SharedStore = Arc::new(ChromaStore::new(&config.store, embedder)?);

        let mut internal_tools: Vec<SharedTool> =
            vec![Arc::new(DocSearchTool::new(store, config.store.top_k))];

        if !config.docs.document_ids.is_empty() {
            match GoogleDocsClient::new(&config.docs) {
                Ok(client) => {
                    let searcher =
                        PolicyDocSearcher::new(client, config.docs.document_ids.clone());
                    internal_tools.push(Arc::new(PolicyDocTool::new(searcher)));
                }
                Err(e) => info!("Policy document search disabled: {}", e),
            }
        }

        let web_search: Option<SharedTool> = match WebSearchTool::new(&config.tools) {
            Ok(tool) => Some(Arc::new(tool)),
            Err(e) => {
                info!("Web search disabled: {}", e);
                None
            }
        };

        let guardrails = Guardrails::initialize(&config.guardrails, provider.clone()).await?;

        Ok(Self::wire(guardrails, provider, internal_tools, web_search))
    }

    /// Wire the pipeline from already-built collaborators.
    pub fn wire(
        guardrails: Guardrails,
        provider: SharedProvider,
        internal_tools: Vec<SharedTool>,
        web_search: Option<SharedTool>,
    ) -> Self {
        let it_specialist = SpecialistAgent::new(
            SpecialistDomain::It,
            provider.clone(),
            internal_tools.clone(),
            web_search.clone(),
        );
        let finance_specialist = SpecialistAgent::new(
            SpecialistDomain::Finance,
            provider.clone(),
            internal_tools,
            web_search,
        );

        Self {
            guardrails,
            router: Router::new(provider),
            it_specialist,
            finance_specialist,
        }
    }

    /// Handle one query end to end.
    pub async fn handle(&self, query: &str) -> Result<AgentResponse> {
        if let PreCheck::Refused(refusal) = self.guardrails.pre_check(query) {
            return Ok(AgentResponse::new(query, RouteLabel::Irrelevant, refusal));
        }

        let decision = self.router.route(query).await;
        debug!("Routing decision: {} ({:?})", decision.label, decision.detail);

        let response = match next_state(decision.label) {
            WorkflowState::ItSpecialist => self.it_specialist.run(query).await?,
            WorkflowState::FinanceSpecialist => self.finance_specialist.run(query).await?,
            WorkflowState::IrrelevantHandler => {
                AgentResponse::new(query, RouteLabel::Irrelevant, IRRELEVANT_ANSWER)
            }
            // next_state only yields handler states
            WorkflowState::Routing | WorkflowState::Done => {
                AgentResponse::new(query, RouteLabel::It, IRRELEVANT_ANSWER)
            }
        };

        let delivered = self.guardrails.post_check(response.response_text).await;

        Ok(AgentResponse::new(query, response.route, delivered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuardrailSettings;
    use crate::constants::REFUSAL_INPUT;
    use crate::llm::{ChatRequest, Completion, LlmProvider};
    use crate::store::{Document, DocumentStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with a routing label on the first call and an answer on later
    /// calls, counting every completion.
    struct SequencedProvider {
        label: String,
        answer: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for SequencedProvider {
        async fn complete(&self, _request: &ChatRequest) -> Result<Completion> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                Ok(Completion::text_only(self.label.clone()))
            } else {
                Ok(Completion::text_only(self.answer.clone()))
            }
        }

        fn name(&self) -> &str {
            "sequenced"
        }

        fn model(&self) -> &str {
            "sequenced-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl DocumentStore for EmptyStore {
        async fn similarity_search(&self, _query: &str, _k: usize) -> Result<Vec<Document>> {
            Ok(vec![])
        }

        async fn add_documents(&self, _documents: Vec<Document>) -> Result<()> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn engine(label: &str, answer: &str) -> (AgentEngine, Arc<SequencedProvider>) {
        let provider = Arc::new(SequencedProvider {
            label: label.to_string(),
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
        });
        let guardrails = Guardrails::pre_check_only(&GuardrailSettings::default());
        let internal: SharedTool = Arc::new(DocSearchTool::new(Arc::new(EmptyStore), 4));
        let engine = AgentEngine::wire(guardrails, provider.clone(), vec![internal], None);
        (engine, provider)
    }

    #[tokio::test]
    async fn test_banned_query_never_reaches_specialist() {
        let (engine, provider) = engine("IT", "should never appear");

        let response = engine.handle("how to hack the mainframe").await.unwrap();

        assert_eq!(response.response_text, REFUSAL_INPUT);
        // neither the router nor a specialist made a completion call
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_it_query_flows_to_specialist() {
        let (engine, _) = engine("IT", "Restart the VPN client.");

        let response = engine.handle("my vpn is down").await.unwrap();

        assert_eq!(response.route, RouteLabel::It);
        assert_eq!(response.response_text, "Restart the VPN client.");
    }

    #[tokio::test]
    async fn test_irrelevant_query_gets_canned_redirect() {
        let (engine, provider) = engine("IRRELEVANT", "unused");

        let response = engine.handle("what's the weather like?").await.unwrap();

        assert_eq!(response.route, RouteLabel::Irrelevant);
        assert_eq!(response.response_text, IRRELEVANT_ANSWER);
        // only the routing call happened
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_label_defaults_to_it() {
        let (engine, _) = engine("weather", "Default path answer.");

        let response = engine.handle("something odd").await.unwrap();

        assert_eq!(response.route, RouteLabel::It);
        assert_eq!(response.response_text, "Default path answer.");
    }
}
