//! Route definitions for the chat domain API

use axum::{routing::get, Router};

use super::handlers::webhook;
use super::middleware::ChatState;

/// Create all chat domain API routes
pub fn routes() -> Router<ChatState> {
    Router::new().route(
        "/webhook",
        get(webhook::verify_webhook).post(webhook::receive_webhook),
    )
}
