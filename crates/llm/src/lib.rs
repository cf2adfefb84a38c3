//! Paradise Tours LLM Service
//!
//! Provides chat-completion functionality for the conversational bot:
//! - DeepSeek chat API integration for production completions
//! - Mock service for testing and development

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod deepseek;
pub mod mock;

pub use deepseek::DeepSeekService;
pub use mock::{FailingLlmService, MockLlmService};

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM response invalid: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,

    #[error("LLM request timed out")]
    Timeout,
}

/// Role of a chat message sent to the completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

/// A single chat message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

/// Request for a chat completion
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier; empty string selects the service default
    pub model: String,
    /// Optional system prompt prepended to the conversation
    pub system_prompt: Option<String>,
    /// Conversation history, oldest first
    pub messages: Vec<LlmMessage>,
    /// Completion token cap; None selects the service default
    pub max_tokens: Option<u32>,
}

/// Response from a chat completion
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// LLM service configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Completion provider (deepseek, mock)
    pub provider: String,
    pub api_key: String,
    /// API base URL override (for tests)
    pub base_url: Option<String>,
    pub default_model: String,
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Create LLM config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "deepseek".to_string());

        let api_key = match provider.as_str() {
            "mock" => String::new(),
            _ => std::env::var("DEEPSEEK_API_KEY")
                .map_err(|_| LlmError::Configuration("DEEPSEEK_API_KEY is required".to_string()))?,
        };

        Ok(Self {
            provider,
            api_key,
            base_url: std::env::var("DEEPSEEK_BASE_URL").ok(),
            default_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| deepseek::DEFAULT_MODEL.to_string()),
            max_tokens: deepseek::DEFAULT_MAX_TOKENS,
        })
    }
}

/// LLM service trait for different implementations
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Run a chat completion request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Return the default model identifier for this service
    fn default_model(&self) -> &str;
}

/// LLM service factory
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create an LLM service based on configuration
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "deepseek" => {
                tracing::info!("Creating DeepSeek LLM service");
                Ok(Box::new(DeepSeekService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(MockLlmService::new()))
            }
            other => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}",
                other
            ))),
        }
    }
}
