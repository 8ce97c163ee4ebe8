//! Guardrails
//!
//! Two independent checks around a query's lifecycle. The pre-check is a
//! case-insensitive substring scan of the incoming query against the
//! configured banned-term list; a hit short-circuits the whole pipeline with
//! a canned refusal before any specialist runs. The post-check sends the
//! final answer through a SAFE/UNSAFE judge completion; `UNSAFE` anywhere in
//! the raw verdict replaces the answer with the output refusal.
//!
//! The post-check is best effort: a judge transport failure leaves the answer
//! unchanged. Setup failure is governed by `fail_mode`: closed (default)
//! makes it fatal at startup, open disables the post-check with a warning.

use tracing::{info, warn};

use crate::config::{FailMode, GuardrailSettings};
use crate::constants::{REFUSAL_INPUT, REFUSAL_OUTPUT};
use crate::llm::{ChatRequest, SharedProvider};
use crate::types::{Result, TriageError};

const JUDGE_PROMPT: &str = "\
You are a content safety judge. Assess whether the following support answer \
is safe to show to an employee. Reply with exactly one word: SAFE or UNSAFE.";

/// Outcome of the input pre-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreCheck {
    Allowed,
    /// Canned refusal to return; the specialist must never run.
    Refused(String),
}

/// Pre- and post-checks wired around the pipeline.
pub struct Guardrails {
    banned_terms: Vec<String>,
    judge: Option<SharedProvider>,
}

impl Guardrails {
    /// Build the guardrails, applying the configured failure policy.
    ///
    /// A judge health check failure is fatal under `FailMode::Closed` and
    /// downgrades to "no post-check" under `FailMode::Open`.
    pub async fn initialize(
        settings: &GuardrailSettings,
        provider: SharedProvider,
    ) -> Result<Self> {
        let banned_terms: Vec<String> = settings
            .banned_terms
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        let healthy = matches!(provider.health_check().await, Ok(true));
        let judge = if healthy {
            Some(provider)
        } else {
            match settings.fail_mode {
                FailMode::Closed => {
                    return Err(TriageError::Guardrail(
                        "safety judge unavailable and fail_mode is closed".to_string(),
                    ));
                }
                FailMode::Open => {
                    warn!("Safety judge unavailable, post-check disabled (fail_mode=open)");
                    None
                }
            }
        };

        info!(
            "Guardrails ready: {} banned terms, post-check {}",
            banned_terms.len(),
            if judge.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            banned_terms,
            judge,
        })
    }

    /// Build guardrails without a post-check judge. Used by the self-test
    /// command, which only exercises the pre-check.
    pub fn pre_check_only(settings: &GuardrailSettings) -> Self {
        Self {
            banned_terms: settings.banned_terms.iter().map(|t| t.to_lowercase()).collect(),
            judge: None,
        }
    }

    /// Scan the query for banned terms. Case-insensitive substring match.
    pub fn pre_check(&self, query: &str) -> PreCheck {
        let lowered = query.to_lowercase();
        for term in &self.banned_terms {
            if lowered.contains(term.as_str()) {
                warn!("Query refused by banned-term filter");
                return PreCheck::Refused(REFUSAL_INPUT.to_string());
            }
        }
        PreCheck::Allowed
    }

    /// Judge the final answer. Returns the answer to deliver: the original on
    /// a SAFE verdict or any judge failure, the canned refusal on UNSAFE.
    pub async fn post_check(&self, answer: String) -> String {
        let Some(judge) = &self.judge else {
            return answer;
        };

        let request = ChatRequest::single_turn(JUDGE_PROMPT, answer.clone());
        match judge.complete(&request).await {
            Ok(completion) if completion.text.to_uppercase().contains("UNSAFE") => {
                warn!("Answer replaced by safety judge verdict");
                REFUSAL_OUTPUT.to_string()
            }
            Ok(_) => answer,
            Err(e) => {
                warn!("Safety judge call failed, keeping answer: {}", e);
                answer
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, LlmProvider};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockJudge {
        verdict: std::result::Result<String, String>,
        healthy: bool,
    }

    #[async_trait]
    impl LlmProvider for MockJudge {
        async fn complete(&self, _request: &ChatRequest) -> Result<Completion> {
            match &self.verdict {
                Ok(text) => Ok(Completion::text_only(text.clone())),
                Err(message) => Err(TriageError::LlmApi(message.clone())),
            }
        }

        fn name(&self) -> &str {
            "mock-judge"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(self.healthy)
        }
    }

    fn judge(verdict: &str, healthy: bool) -> SharedProvider {
        Arc::new(MockJudge {
            verdict: Ok(verdict.to_string()),
            healthy,
        })
    }

    #[test]
    fn test_pre_check_is_case_insensitive_substring() {
        let guardrails = Guardrails::pre_check_only(&GuardrailSettings::default());

        assert_eq!(guardrails.pre_check("how do I reset my vpn?"), PreCheck::Allowed);
        assert!(matches!(
            guardrails.pre_check("how do I HACK the payroll system?"),
            PreCheck::Refused(_)
        ));
        assert!(matches!(
            guardrails.pre_check("is this malware-related?"),
            PreCheck::Refused(_)
        ));
    }

    #[test]
    fn test_pre_check_refusal_text() {
        let guardrails = Guardrails::pre_check_only(&GuardrailSettings::default());
        let PreCheck::Refused(text) = guardrails.pre_check("exploit this") else {
            panic!("expected refusal");
        };
        assert_eq!(text, REFUSAL_INPUT);
    }

    #[tokio::test]
    async fn test_post_check_unsafe_replaces_answer() {
        let guardrails = Guardrails::initialize(&GuardrailSettings::default(), judge("UNSAFE", true))
            .await
            .unwrap();
        let delivered = guardrails.post_check("questionable answer".to_string()).await;
        assert_eq!(delivered, REFUSAL_OUTPUT);
    }

    #[tokio::test]
    async fn test_post_check_safe_keeps_answer() {
        let guardrails = Guardrails::initialize(&GuardrailSettings::default(), judge("SAFE", true))
            .await
            .unwrap();
        let delivered = guardrails.post_check("fine answer".to_string()).await;
        assert_eq!(delivered, "fine answer");
    }

    #[tokio::test]
    async fn test_post_check_judge_failure_keeps_answer() {
        let failing: SharedProvider = Arc::new(MockJudge {
            verdict: Err("timeout".to_string()),
            healthy: true,
        });
        let guardrails = Guardrails::initialize(&GuardrailSettings::default(), failing)
            .await
            .unwrap();
        let delivered = guardrails.post_check("fine answer".to_string()).await;
        assert_eq!(delivered, "fine answer");
    }

    #[tokio::test]
    async fn test_fail_closed_rejects_unhealthy_judge() {
        let result =
            Guardrails::initialize(&GuardrailSettings::default(), judge("SAFE", false)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fail_open_disables_post_check() {
        let settings = GuardrailSettings {
            fail_mode: FailMode::Open,
            ..Default::default()
        };
        let guardrails = Guardrails::initialize(&settings, judge("UNSAFE", false))
            .await
            .unwrap();
        // post-check is off: even an UNSAFE-leaning judge never runs
        let delivered = guardrails.post_check("answer".to_string()).await;
        assert_eq!(delivered, "answer");
    }
}
