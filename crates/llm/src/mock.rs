//! Mock LLM Service Implementations
//!
//! `MockLlmService` returns deterministic responses; `FailingLlmService`
//! always errors, for exercising the fallback path in tests.

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService;

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        let model = if request.model.is_empty() {
            "mock-model".to_string()
        } else {
            request.model
        };

        // Generate a simple response based on the last user message
        let last_message = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        let content = format!("Mock response to: {}", last_message);
        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "stop".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}

/// LLM service that fails every request, for fallback-path tests
#[derive(Debug, Clone, Default)]
pub struct FailingLlmService;

impl FailingLlmService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl LlmService for FailingLlmService {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::Request("simulated failure".to_string()))
    }

    fn default_model(&self) -> &str {
        "failing-model"
    }
}
