//! Core domain types shared across the crate.
//!
//! Everything here is per-request data: a query comes in, gets a routing
//! decision, flows through a specialist, and leaves as an `AgentResponse`.
//! Nothing in this module outlives a single request.

pub mod error;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, Result, TriageError};

use serde::{Deserialize, Serialize};

// =============================================================================
// Routing
// =============================================================================

/// Topical label assigned to an incoming query by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteLabel {
    It,
    Finance,
    Irrelevant,
}

impl RouteLabel {
    /// Parse a raw classifier response into a label.
    ///
    /// The response is trimmed and uppercased, then matched exactly against
    /// the label set. Anything else returns `None`; the router substitutes
    /// the fail-open default (`It`) rather than refusing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "IT" => Some(Self::It),
            "FINANCE" => Some(Self::Finance),
            "IRRELEVANT" => Some(Self::Irrelevant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Finance => "FINANCE",
            Self::Irrelevant => "IRRELEVANT",
        }
    }
}

impl std::fmt::Display for RouteLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one classification call.
///
/// Created by the router for every query and consumed once by the workflow
/// dispatcher. `detail` carries the classifier error text when the call
/// failed and the fail-open default was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub query: String,
    pub label: RouteLabel,
    pub detail: Option<String>,
}

impl RoutingDecision {
    pub fn new(query: impl Into<String>, label: RouteLabel) -> Self {
        Self {
            query: query.into(),
            label,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered record of a specialist run: user turn, tool summaries, model output.
///
/// Extraction of the final answer returns `Option` so an empty or
/// assistant-free transcript is an explicit "no answer produced" case at the
/// caller, never a panic.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Content of the most recent assistant-authored message, if any.
    pub fn last_assistant(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

// =============================================================================
// Tool Results
// =============================================================================

/// Result of one tool invocation, owned by the specialist step that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_name: String,
    pub text: String,
    pub success: bool,
}

impl ToolResult {
    pub fn ok(tool_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            text: text.into(),
            success: true,
        }
    }

    pub fn failed(tool_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            text: text.into(),
            success: false,
        }
    }

    /// A successful call that found nothing.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// =============================================================================
// Terminal Response
// =============================================================================

/// Terminal record returned to the caller. No further mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub query: String,
    pub route: RouteLabel,
    pub response_text: String,
}

impl AgentResponse {
    pub fn new(
        query: impl Into<String>,
        route: RouteLabel,
        response_text: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            route,
            response_text: response_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_exact() {
        assert_eq!(RouteLabel::parse("IT"), Some(RouteLabel::It));
        assert_eq!(RouteLabel::parse("FINANCE"), Some(RouteLabel::Finance));
        assert_eq!(RouteLabel::parse("IRRELEVANT"), Some(RouteLabel::Irrelevant));
    }

    #[test]
    fn test_label_parse_normalizes_case_and_whitespace() {
        assert_eq!(RouteLabel::parse("  finance  "), Some(RouteLabel::Finance));
        assert_eq!(RouteLabel::parse("it\n"), Some(RouteLabel::It));
        assert_eq!(RouteLabel::parse("Finance"), Some(RouteLabel::Finance));
    }

    #[test]
    fn test_label_parse_rejects_everything_else() {
        assert_eq!(RouteLabel::parse("weather"), None);
        assert_eq!(RouteLabel::parse("IT department"), None);
        assert_eq!(RouteLabel::parse(""), None);
    }

    #[test]
    fn test_transcript_last_assistant() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("how do I reset my password?"));
        transcript.push(ChatMessage::assistant("first answer"));
        transcript.push(ChatMessage::user("thanks"));
        transcript.push(ChatMessage::assistant("second answer"));

        assert_eq!(transcript.last_assistant(), Some("second answer"));
    }

    #[test]
    fn test_transcript_without_assistant_messages() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("hello"));

        assert_eq!(transcript.last_assistant(), None);
        assert_eq!(Transcript::new().last_assistant(), None);
    }

    #[test]
    fn test_tool_result_empty() {
        assert!(ToolResult::ok("web_search", "  ").is_empty());
        assert!(!ToolResult::ok("web_search", "hit").is_empty());
    }
}
