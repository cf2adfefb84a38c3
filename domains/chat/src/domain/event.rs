//! Inbound webhook events
//!
//! Wire types for the Messenger webhook payload and the normalizer that
//! turns a raw batch into typed events. Malformed units are dropped and
//! logged; only a top-level object-type mismatch rejects the whole batch.

use serde::{Deserialize, Serialize};

use paradise_common::Error;

/// Object type this webhook subscribes to
const EXPECTED_OBJECT: &str = "page";

/// Top-level webhook payload: `{ object, entry: [ { messaging: [...] } ] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEntry {
    pub messaging: Option<Vec<RawMessagingEvent>>,
}

/// One raw messaging sub-event, before classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessagingEvent {
    pub sender: Option<RawSender>,
    #[serde(default)]
    pub timestamp: i64,
    pub message: Option<RawMessage>,
    pub postback: Option<RawPostback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSender {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub text: Option<String>,
    pub quick_reply: Option<RawQuickReply>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuickReply {
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAttachment {
    #[serde(rename = "type")]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPostback {
    pub payload: String,
}

/// A received attachment, kept only by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: String,
}

/// A free-form message event
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent {
    pub sender_id: String,
    pub text: Option<String>,
    pub attachments: Vec<Attachment>,
    pub quick_reply_payload: Option<String>,
    pub timestamp: i64,
}

/// A button-press event carrying a dispatch payload
#[derive(Debug, Clone, PartialEq)]
pub struct PostbackEvent {
    pub sender_id: String,
    pub payload: String,
    pub timestamp: i64,
}

/// A normalized inbound event. Exactly one shape per event; the router
/// matches exhaustively over the tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(MessageEvent),
    Postback(PostbackEvent),
}

impl Event {
    pub fn sender_id(&self) -> &str {
        match self {
            Event::Message(m) => &m.sender_id,
            Event::Postback(p) => &p.sender_id,
        }
    }
}

/// Normalize a raw webhook payload into typed events.
///
/// Returns `Error::NotFound` when the payload does not identify as the
/// expected source type (maps to HTTP 404 at the boundary). All other
/// validation failures drop the offending unit and continue.
pub fn normalize(payload: WebhookPayload) -> Result<Vec<Event>, Error> {
    if payload.object != EXPECTED_OBJECT {
        tracing::warn!(object = %payload.object, "Rejecting webhook with unexpected object type");
        return Err(Error::NotFound(format!(
            "Unexpected webhook object type: {}",
            payload.object
        )));
    }

    let mut events = Vec::new();

    for entry in payload.entry {
        let Some(messaging) = entry.messaging else {
            tracing::warn!("Skipping webhook entry without messaging array");
            continue;
        };

        for raw in messaging {
            let Some(sender) = raw.sender else {
                tracing::warn!("Dropping messaging event without sender");
                continue;
            };

            // Postback checked first: payload dispatch takes priority over
            // text when both shapes are somehow present on one event.
            if let Some(postback) = raw.postback {
                events.push(Event::Postback(PostbackEvent {
                    sender_id: sender.id,
                    payload: postback.payload,
                    timestamp: raw.timestamp,
                }));
            } else if let Some(message) = raw.message {
                events.push(Event::Message(MessageEvent {
                    sender_id: sender.id,
                    text: message.text.filter(|t| !t.is_empty()),
                    attachments: message
                        .attachments
                        .into_iter()
                        .map(|a| Attachment {
                            kind: a.attachment_type.unwrap_or_else(|| "unknown".to_string()),
                        })
                        .collect(),
                    quick_reply_payload: message.quick_reply.map(|q| q.payload),
                    timestamp: raw.timestamp,
                }));
            } else {
                tracing::debug!(sender_id = %sender.id, "Dropping unclassified messaging event");
            }
        }
    }

    Ok(events)
}
