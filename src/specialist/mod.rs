//! Specialist Steps
//!
//! One specialist per support domain. Each run works through a fixed, ordered
//! tool sequence: internal document search always runs first, web search is
//! consulted only when internal retrieval comes back empty. Whatever the
//! tools produced is folded into a single completion under the domain system
//! prompt.
//!
//! Every run produces an answer. A completion failure or an empty transcript
//! yields the explicit "Information not found." fallback, never a panic and
//! never an error to the caller.

use tracing::{debug, warn};

use crate::constants::NO_ANSWER;
use crate::llm::{ChatRequest, SharedProvider};
use crate::tools::SharedTool;
use crate::types::{
    AgentResponse, ChatMessage, Result, RouteLabel, ToolResult, Transcript,
};

const IT_SYSTEM_PROMPT: &str = "\
You are an IT support specialist. Answer questions about software, hardware, \
accounts, passwords, VPN, email, and devices.

Rules:
- Base your answer on the provided internal documents first.
- Never invent facts that are not in the provided material.
- If the material does not contain the answer, reply exactly: Information not found.
- No greeting. Answer directly.";

const FINANCE_SYSTEM_PROMPT: &str = "\
You are a finance support specialist. Answer questions about payroll, \
expenses, reimbursements, invoices, budgets, and purchasing.

Rules:
- Base your answer on the provided internal documents first.
- Never invent facts that are not in the provided material.
- If the material does not contain the answer, reply exactly: Information not found.
- No greeting. Answer directly.";

/// Support domain a specialist is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialistDomain {
    It,
    Finance,
}

impl SpecialistDomain {
    fn system_prompt(&self) -> &'static str {
        match self {
            Self::It => IT_SYSTEM_PROMPT,
            Self::Finance => FINANCE_SYSTEM_PROMPT,
        }
    }

    fn route_label(&self) -> RouteLabel {
        match self {
            Self::It => RouteLabel::It,
            Self::Finance => RouteLabel::Finance,
        }
    }
}

/// A domain specialist with its fixed tool order.
pub struct SpecialistAgent {
    domain: SpecialistDomain,
    provider: SharedProvider,
    internal_tools: Vec<SharedTool>,
    web_search: Option<SharedTool>,
}

impl SpecialistAgent {
    pub fn new(
        domain: SpecialistDomain,
        provider: SharedProvider,
        internal_tools: Vec<SharedTool>,
        web_search: Option<SharedTool>,
    ) -> Self {
        Self {
            domain,
            provider,
            internal_tools,
            web_search,
        }
    }

    pub fn domain(&self) -> SpecialistDomain {
        self.domain
    }

    /// Run the full step for one query.
    pub async fn run(&self, query: &str) -> Result<AgentResponse> {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user(query));

        let tool_results = self.gather_context(query).await;
        for result in &tool_results {
            transcript.push(ChatMessage::system(format!(
                "[{}] {}",
                result.tool_name, result.text
            )));
        }

        let prompt = build_final_prompt(query, &tool_results);
        let request = ChatRequest::single_turn(self.domain.system_prompt(), prompt);

        match self.provider.complete(&request).await {
            Ok(completion) => transcript.push(ChatMessage::assistant(completion.text)),
            Err(e) => warn!("Specialist completion failed: {}", e),
        }

        let answer = match transcript.last_assistant() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => NO_ANSWER.to_string(),
        };

        Ok(AgentResponse::new(query, self.domain.route_label(), answer))
    }

    /// Run the ordered tool sequence. Every internal source is consulted in
    /// order; web search only when no internal source produced anything.
    async fn gather_context(&self, query: &str) -> Vec<ToolResult> {
        let mut results = Vec::new();
        let mut internal_hit = false;

        for tool in &self.internal_tools {
            let result = tool.invoke(query).await;
            debug!(
                "Tool {}: success={} empty={}",
                result.tool_name,
                result.success,
                result.is_empty()
            );
            internal_hit |= result.success && !result.is_empty();
            results.push(result);
        }

        if !internal_hit {
            if let Some(web) = &self.web_search {
                results.push(web.invoke(query).await);
            }
        }

        results
    }
}

/// Fold the query and the usable tool output into the final user prompt.
fn build_final_prompt(query: &str, tool_results: &[ToolResult]) -> String {
    let mut sections = Vec::new();

    for result in tool_results {
        if result.success && !result.is_empty() {
            sections.push(format!(
                "Results from {}:\n{}",
                result.tool_name, result.text
            ));
        }
    }

    if sections.is_empty() {
        format!("Question: {}\n\nNo supporting material was found.", query)
    } else {
        format!("Question: {}\n\n{}", query, sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, LlmProvider};
    use crate::tools::Tool;
    use crate::types::TriageError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ScriptedProvider {
        response: std::result::Result<String, String>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(&self, _request: &ChatRequest) -> crate::types::Result<Completion> {
            match &self.response {
                Ok(text) => Ok(Completion::text_only(text.clone())),
                Err(message) => Err(TriageError::LlmApi(message.clone())),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn health_check(&self) -> crate::types::Result<bool> {
            Ok(true)
        }
    }

    struct CountingTool {
        name: &'static str,
        text: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }

        async fn invoke(&self, _query: &str) -> ToolResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ToolResult::ok(self.name, self.text.clone())
        }
    }

    fn counting_tool(name: &'static str, text: &str) -> (SharedTool, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = Arc::new(CountingTool {
            name,
            text: text.to_string(),
            calls: calls.clone(),
        });
        (tool, calls)
    }

    fn provider(text: &str) -> SharedProvider {
        Arc::new(ScriptedProvider {
            response: Ok(text.to_string()),
        })
    }

    #[tokio::test]
    async fn test_web_search_skipped_when_internal_found() {
        let (internal, internal_calls) = counting_tool("internal_search", "VPN guide text.");
        let (web, web_calls) = counting_tool("web_search", "web hit");

        let agent = SpecialistAgent::new(
            SpecialistDomain::It,
            provider("Install the VPN client."),
            vec![internal],
            Some(web),
        );
        let response = agent.run("how do I set up the vpn?").await.unwrap();

        assert_eq!(response.route, RouteLabel::It);
        assert_eq!(response.response_text, "Install the VPN client.");
        assert_eq!(internal_calls.load(Ordering::SeqCst), 1);
        assert_eq!(web_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_web_search_runs_when_internal_empty() {
        let (internal, _) = counting_tool("internal_search", "");
        let (web, web_calls) = counting_tool("web_search", "external answer");

        let agent = SpecialistAgent::new(
            SpecialistDomain::Finance,
            provider("Per the external source, file by Friday."),
            vec![internal],
            Some(web),
        );
        let response = agent.run("expense deadline?").await.unwrap();

        assert_eq!(response.route, RouteLabel::Finance);
        assert_eq!(web_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_any_internal_hit_suppresses_web_search() {
        let (vector, _) = counting_tool("internal_search", "");
        let (policy, _) = counting_tool("policy_docs", "Expenses over 50 EUR need a receipt.");
        let (web, web_calls) = counting_tool("web_search", "web hit");

        let agent = SpecialistAgent::new(
            SpecialistDomain::Finance,
            provider("You need a receipt."),
            vec![vector, policy],
            Some(web),
        );
        agent.run("receipt rules?").await.unwrap();

        assert_eq!(web_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_yields_fallback() {
        let (internal, _) = counting_tool("internal_search", "");

        let agent = SpecialistAgent::new(
            SpecialistDomain::It,
            Arc::new(ScriptedProvider {
                response: Err("timeout".to_string()),
            }),
            vec![internal],
            None,
        );
        let response = agent.run("anything").await.unwrap();

        assert_eq!(response.response_text, NO_ANSWER);
    }

    #[tokio::test]
    async fn test_blank_completion_yields_fallback() {
        let (internal, _) = counting_tool("internal_search", "some doc");

        let agent =
            SpecialistAgent::new(SpecialistDomain::It, provider("   "), vec![internal], None);
        let response = agent.run("anything").await.unwrap();

        assert_eq!(response.response_text, NO_ANSWER);
    }

    #[test]
    fn test_final_prompt_excludes_failed_tools() {
        let results = vec![
            ToolResult::failed("internal_search", "unavailable: down"),
            ToolResult::ok("web_search", "useful snippet"),
        ];
        let prompt = build_final_prompt("question?", &results);
        assert!(prompt.contains("useful snippet"));
        assert!(!prompt.contains("unavailable"));
    }

    #[test]
    fn test_final_prompt_without_material() {
        let prompt = build_final_prompt("question?", &[]);
        assert!(prompt.contains("No supporting material was found."));
    }
}
