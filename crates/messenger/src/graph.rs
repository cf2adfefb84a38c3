//! Facebook Graph Send API Client Implementation
//!
//! POSTs messages to `{base_url}/me/messages?access_token={token}`
//! with a `{ recipient: { id }, message }` body.

use serde::{Deserialize, Serialize};

use crate::{MessengerConfig, MessengerError, MessengerService, OutboundMessage};

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// Send API request body
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    recipient: Recipient<'a>,
    message: &'a OutboundMessage,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    id: &'a str,
}

/// Send API success response
#[derive(Debug, Deserialize)]
struct SendResponse {
    message_id: Option<String>,
}

/// Real Graph API client for delivering messages to Messenger
pub struct GraphApiClient {
    http: reqwest::Client,
    send_url: String,
}

impl GraphApiClient {
    /// Create a new Graph API client from configuration
    pub fn new(config: MessengerConfig) -> Self {
        let send_url = format!(
            "{}/me/messages?access_token={}",
            config.base_url.trim_end_matches('/'),
            config.page_access_token
        );
        Self {
            http: reqwest::Client::new(),
            send_url,
        }
    }
}

#[async_trait::async_trait]
impl MessengerService for GraphApiClient {
    async fn send(
        &self,
        recipient_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessengerError> {
        let body = SendRequest {
            recipient: Recipient { id: recipient_id },
            message,
        };

        let response = self
            .http
            .post(&self.send_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MessengerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(MessengerError::Response(format!(
                "Send API returned {}: {}",
                status, error_body
            )));
        }

        let data: SendResponse = response
            .json()
            .await
            .map_err(|e| MessengerError::Response(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            recipient_id = %recipient_id,
            message_id = ?data.message_id,
            "Message sent successfully"
        );
        Ok(())
    }
}
