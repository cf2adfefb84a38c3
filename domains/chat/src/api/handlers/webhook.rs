//! Webhook API handlers
//!
//! The transport boundary: verification handshake on GET, event batches on
//! POST. Handlers acknowledge the platform; replies flow out through the
//! delivery gateway, at most once, with failures logged and not retried.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use paradise_common::Result;

use crate::api::middleware::ChatState;
use crate::domain::event::{normalize, WebhookPayload};

/// Query parameters of the verification handshake
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// `GET /webhook` — subscription verification handshake
pub async fn verify_webhook(
    State(state): State<ChatState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match (params.mode.as_deref(), params.verify_token.as_deref()) {
        (Some("subscribe"), Some(token)) if token == state.verify_token => {
            tracing::info!("Webhook verified successfully");
            (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
        }
        (Some(mode), Some(_)) => {
            tracing::warn!(mode = %mode, "Webhook verification failed: token mismatch");
            StatusCode::FORBIDDEN.into_response()
        }
        _ => {
            tracing::warn!("Invalid verification request: missing mode or token");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

/// `POST /webhook` — inbound event batch
pub async fn receive_webhook(
    State(state): State<ChatState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<serde_json::Value>> {
    let events = normalize(payload)?;
    tracing::debug!(count = events.len(), "Processing webhook events");

    for event in events {
        let outbound = state.router.dispatch(event).await;
        let message = outbound.reply.to_outbound();

        // At-most-once delivery: log and move on, never retry. The
        // conversation state already advanced.
        if let Err(e) = state.messenger.send(&outbound.recipient_id, &message).await {
            tracing::error!(
                error = %e,
                recipient_id = %outbound.recipient_id,
                "Failed to deliver reply"
            );
        }
    }

    Ok(Json(json!({ "status": "EVENT_RECEIVED" })))
}
