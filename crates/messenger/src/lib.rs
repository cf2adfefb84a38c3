//! Paradise Tours Messenger Service
//!
//! Provides outbound message delivery with support for:
//! - Facebook Graph Send API integration for production
//! - Mock messenger service for testing and development
//!
//! Delivery is at-most-once: callers log failures and do not retry.

pub mod graph;
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use graph::GraphApiClient;
pub use mock::MockMessengerService;

#[derive(Error, Debug)]
pub enum MessengerError {
    #[error("Messenger configuration error: {0}")]
    Configuration(String),

    #[error("Messenger request error: {0}")]
    Request(String),

    #[error("Messenger response error: {0}")]
    Response(String),
}

/// A quick-reply button attached to a text message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub content_type: String,
    pub title: String,
    pub payload: String,
}

impl QuickReply {
    /// Create a text quick reply
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// A button on a generic-template card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplateButton {
    #[serde(rename = "web_url")]
    WebUrl { url: String, title: String },
    #[serde(rename = "postback")]
    Postback { title: String, payload: String },
}

/// A single element of a generic template (one card in the carousel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub buttons: Vec<TemplateButton>,
}

/// Generic-template attachment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePayload {
    pub template_type: String,
    pub elements: Vec<TemplateElement>,
}

/// Message attachment (template carousel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub attachment_type: String,
    pub payload: TemplatePayload,
}

/// An outbound message in Send API wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutboundMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    /// Create a plain text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a text message with quick replies
    pub fn with_quick_replies(text: impl Into<String>, quick_replies: Vec<QuickReply>) -> Self {
        Self {
            text: Some(text.into()),
            quick_replies: Some(quick_replies),
            ..Default::default()
        }
    }

    /// Create a generic-template carousel message
    pub fn generic_template(elements: Vec<TemplateElement>) -> Self {
        Self {
            attachment: Some(Attachment {
                attachment_type: "template".to_string(),
                payload: TemplatePayload {
                    template_type: "generic".to_string(),
                    elements,
                },
            }),
            ..Default::default()
        }
    }
}

/// Messenger service configuration
#[derive(Clone)]
pub struct MessengerConfig {
    /// Send API credential
    pub page_access_token: String,
    /// Graph API base URL
    pub base_url: String,
}

impl std::fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("page_access_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl MessengerConfig {
    /// Create a messenger config with the default Graph API base URL
    pub fn new(page_access_token: String, base_url: Option<String>) -> Self {
        Self {
            page_access_token,
            base_url: base_url.unwrap_or_else(|| graph::DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Messenger service trait for different implementations
#[async_trait::async_trait]
pub trait MessengerService: Send + Sync {
    /// Send a message to a recipient. At-most-once: failures are returned,
    /// never retried internally.
    async fn send(&self, recipient_id: &str, message: &OutboundMessage)
        -> Result<(), MessengerError>;
}
