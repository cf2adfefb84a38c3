//! Paradise Tours bot composition root
//!
//! Wires the conversation store, completion delegate, and delivery gateway
//! into a single application router.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::json;

use paradise_chat::{ChatState, CompletionDelegate, ConversationStore, DispatchRouter};
use paradise_common::Config;
use paradise_llm::{LlmConfig, LlmServiceFactory};
use paradise_messenger::{GraphApiClient, MessengerConfig};

/// Create the main application router with all routes and middleware
pub fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    let store = Arc::new(ConversationStore::new());

    // The delegate is optional: without a credential the bot falls back to
    // static menu prompts for free text.
    let delegate = build_delegate(&config)?;

    let messenger = Arc::new(GraphApiClient::new(MessengerConfig::new(
        config.page_access_token.clone(),
        config.graph_api_base_url.clone(),
    )));

    let chat_state = ChatState {
        router: Arc::new(DispatchRouter::new(store, delegate)),
        messenger,
        verify_token: config.verify_token.clone(),
    };

    // Build router — compose the domain router with shared infrastructure routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(server_status))
        .merge(paradise_chat::routes().with_state(chat_state));

    Ok(app)
}

fn build_delegate(config: &Config) -> Result<Option<CompletionDelegate>, anyhow::Error> {
    let configured = config.llm_provider == "mock" || config.deepseek_api_key.is_some();
    if !configured {
        tracing::info!("No LLM credential configured, completion delegate disabled");
        return Ok(None);
    }

    let llm_config = LlmConfig {
        provider: config.llm_provider.clone(),
        api_key: config.deepseek_api_key.clone().unwrap_or_default(),
        base_url: config.deepseek_base_url.clone(),
        default_model: paradise_llm::deepseek::DEFAULT_MODEL.to_string(),
        max_tokens: paradise_llm::deepseek::DEFAULT_MAX_TOKENS,
    };
    let service = LlmServiceFactory::create(llm_config)?;

    Ok(Some(CompletionDelegate::new(
        Arc::from(service),
        Duration::from_secs(config.llm_timeout_secs),
    )))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Server status endpoint
async fn server_status() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Webhook server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
