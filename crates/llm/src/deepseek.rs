//! DeepSeek Chat API Implementation
//!
//! Calls the DeepSeek chat completions API
//! (https://api.deepseek.com/v1/chat/completions) using reqwest HTTP client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, CompletionResponse, LlmConfig, LlmError, LlmService};

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// DeepSeek chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<MessageBody>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    role: String,
    content: String,
}

/// DeepSeek chat completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: i32,
    completion_tokens: i32,
}

/// DeepSeek LLM service implementation
pub struct DeepSeekService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl DeepSeekService {
    /// Create a new DeepSeek service
    pub fn new(config: LlmConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client: Client::new(),
            config,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl LlmService for DeepSeekService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model
        };

        let max_tokens = request.max_tokens.unwrap_or(self.config.max_tokens);

        // The chat completions API carries the system prompt as the first
        // message rather than a separate field.
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system_prompt {
            messages.push(MessageBody {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.extend(request.messages.iter().map(|m| MessageBody {
            role: match m.role {
                crate::LlmRole::User => "user".to_string(),
                crate::LlmRole::Assistant => "assistant".to_string(),
            },
            content: m.content.clone(),
        }));

        let body = ChatCompletionRequest {
            model: model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens,
            stream: false,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(model = %model, max_tokens = %max_tokens, "Sending DeepSeek API request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            return Err(LlmError::Response(format!(
                "DeepSeek API returned {}: {}",
                status, error_body
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to parse response: {}", e)))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Response("Response contained no choices".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: api_response.model,
            input_tokens: api_response.usage.prompt_tokens,
            output_tokens: api_response.usage.completion_tokens,
            stop_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                MessageBody {
                    role: "system".to_string(),
                    content: "You are a travel assistant".to_string(),
                },
                MessageBody {
                    role: "user".to_string(),
                    content: "hello".to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            stream: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["stream"], false);
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_body_parses() {
        let raw = serde_json::json!({
            "id": "x",
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Mabuhay!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16 }
        });

        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Mabuhay!");
        assert_eq!(parsed.usage.prompt_tokens, 12);
    }
}
