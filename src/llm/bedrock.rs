//! AWS Bedrock Provider
//!
//! LLM provider using the Bedrock Runtime Converse API with API-key bearer
//! authentication. The Converse message format nests content as text blocks;
//! system prompts travel in a separate `system` array.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{
    ChatRequest, Completion, LlmProvider, ProviderConfig, ResponseMetadata, ResponseTiming,
    TokenUsage,
};
use crate::types::{ErrorClassifier, Result, Role, TriageError};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MODEL: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";

/// AWS Bedrock Converse API Provider
pub struct BedrockProvider {
    /// Bedrock API key - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for BedrockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl BedrockProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key_str = config
            .api_key
            .or_else(|| std::env::var("AWS_BEARER_TOKEN_BEDROCK").ok())
            .ok_or_else(|| {
                TriageError::Config(
                    "Bedrock API key not found. Set AWS_BEARER_TOKEN_BEDROCK env var or provide in config"
                        .to_string(),
                )
            })?;

        let region = config
            .region
            .or_else(|| std::env::var("AWS_REGION").ok())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let api_base = config
            .api_base
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", region));

        let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TriageError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key_str),
            api_base,
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request(&self, request: &ChatRequest) -> ConverseRequest {
        let system = request
            .system
            .as_ref()
            .map(|text| vec![TextBlock { text: text.clone() }]);

        let messages = request
            .messages
            .iter()
            .map(|message| ConverseMessage {
                role: match message.role {
                    // Converse has no system role in the message list
                    Role::System | Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: vec![TextBlock {
                    text: message.content.clone(),
                }],
            })
            .collect();

        ConverseRequest {
            messages,
            system,
            inference_config: InferenceConfig {
                temperature: request.temperature.unwrap_or(self.temperature),
                max_tokens: self.max_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for BedrockProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Completion> {
        debug!(
            "Completing with Bedrock (model: {}, messages: {})",
            self.model,
            request.messages.len()
        );

        let start_time = Instant::now();
        let body = self.build_request(request);
        let url = format!("{}/model/{}/converse", self.api_base, self.model);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TriageError::Llm(ErrorClassifier::classify(
                    &format!("Bedrock request failed: {}", e),
                    "bedrock",
                ))
            })?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Llm(ErrorClassifier::classify_http_status(
                status,
                &format!("Bedrock API error: {}", body),
                "bedrock",
            )));
        }

        let response_body: ConverseResponse = response
            .json()
            .await
            .map_err(|e| TriageError::LlmApi(format!("Failed to parse Bedrock response: {}", e)))?;

        let usage = response_body
            .usage
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();

        let text = response_body
            .output
            .message
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(TriageError::LlmApi(
                "No text content in Bedrock response".to_string(),
            ));
        }

        Ok(Completion::with_metrics(
            text,
            usage,
            ResponseTiming::from_duration(elapsed),
            ResponseMetadata {
                model: self.model.clone(),
                provider: "bedrock".to_string(),
            },
        ))
    }

    fn name(&self) -> &str {
        "bedrock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        // Converse with an empty body is invalid; a 4xx still proves the
        // endpoint is reachable and the credentials got evaluated.
        let url = format!("{}/model/{}/converse", self.api_base, self.model);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&serde_json::json!({}))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().as_u16() == 401 || resp.status().as_u16() == 403 => {
                warn!("Bedrock credentials rejected: {}", resp.status());
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Bedrock API check failed: {}", e);
                Ok(false)
            }
        }
    }
}

// Request/Response types (Converse API)

#[derive(Debug, Serialize)]
struct ConverseRequest {
    messages: Vec<ConverseMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<Vec<TextBlock>>,
    #[serde(rename = "inferenceConfig")]
    inference_config: InferenceConfig,
}

#[derive(Debug, Serialize)]
struct ConverseMessage {
    role: String,
    content: Vec<TextBlock>,
}

#[derive(Debug, Serialize)]
struct TextBlock {
    text: String,
}

#[derive(Debug, Serialize)]
struct InferenceConfig {
    temperature: f32,
    #[serde(rename = "maxTokens")]
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ConverseResponse {
    output: ConverseOutput,
    usage: Option<ConverseUsage>,
}

#[derive(Debug, Deserialize)]
struct ConverseOutput {
    message: OutputMessage,
}

#[derive(Debug, Deserialize)]
struct OutputMessage {
    content: Vec<OutputBlock>,
}

#[derive(Debug, Deserialize)]
struct OutputBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConverseUsage {
    #[serde(rename = "inputTokens")]
    input_tokens: u32,
    #[serde(rename = "outputTokens")]
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> BedrockProvider {
        BedrockProvider::new(ProviderConfig {
            provider: "bedrock".to_string(),
            api_key: Some("bedrock-test-key".to_string()),
            region: Some("eu-west-1".to_string()),
            ..Default::default()
        })
        .expect("provider")
    }

    #[test]
    fn test_region_in_api_base() {
        assert_eq!(
            provider().api_base,
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_system_prompt_separate_from_messages() {
        let request = ChatRequest::single_turn("be brief", "hello");
        let wire = provider().build_request(&request);

        let system = wire.system.expect("system block");
        assert_eq!(system[0].text, "be brief");
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn test_inference_config_from_defaults() {
        let request = ChatRequest::user_only("hello");
        let wire = provider().build_request(&request);
        assert_eq!(wire.inference_config.max_tokens, 4096);
        assert_eq!(wire.inference_config.temperature, 0.0);
    }
}
