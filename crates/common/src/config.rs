//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default timeout for completion delegate calls, in seconds
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret for the webhook verification handshake
    pub verify_token: String,

    /// Messenger Send API credential
    pub page_access_token: String,
    /// Graph API base URL (override for tests)
    pub graph_api_base_url: Option<String>,

    /// Completion delegate configuration
    pub llm_provider: String,
    /// DeepSeek credential; when absent the delegate is left unconfigured
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: Option<String>,
    pub llm_timeout_secs: u64,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            verify_token: env::var("VERIFY_TOKEN")
                .unwrap_or_else(|_| "your_verify_token".to_string()),

            page_access_token: env::var("PAGE_ACCESS_TOKEN")
                .map_err(|_| anyhow::anyhow!("PAGE_ACCESS_TOKEN is required"))?,
            graph_api_base_url: env::var("GRAPH_API_BASE_URL").ok(),

            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "deepseek".to_string()),
            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok(),
            deepseek_base_url: env::var("DEEPSEEK_BASE_URL").ok(),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "paradise=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
