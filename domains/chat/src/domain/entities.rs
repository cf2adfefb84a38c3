//! Domain entities for the chat domain
//!
//! Conversation state, transcript entries, and the reply shapes the
//! dispatch router emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paradise_messenger::{
    OutboundMessage, QuickReply, TemplateButton, TemplateElement,
};

/// Menu position of a conversation. Closed set; unknown or missing state
/// defaults to the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MenuNode {
    #[default]
    MainMenu,
    TourPackages,
    BookTour,
    ContactUs,
}

impl std::fmt::Display for MenuNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuNode::MainMenu => write!(f, "main_menu"),
            MenuNode::TourPackages => write!(f, "tour_packages"),
            MenuNode::BookTour => write!(f, "book_tour"),
            MenuNode::ContactUs => write!(f, "contact_us"),
        }
    }
}

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    User,
    Bot,
    Postback,
}

/// One turn in a user's conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: TranscriptRole::User,
            text: text.into(),
            timestamp,
        }
    }

    pub fn bot(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: TranscriptRole::Bot,
            text: text.into(),
            timestamp,
        }
    }

    pub fn postback(payload: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: TranscriptRole::Postback,
            text: payload.into(),
            timestamp,
        }
    }
}

/// Per-user conversation record. Created on first contact, mutated on every
/// inbound event and outbound reply, dropped only with the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConversationState {
    pub node: MenuNode,
    pub transcript: Vec<TranscriptEntry>,
}

/// A quick-reply choice offered with a text reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub payload: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An action button on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardAction {
    Link { title: String, url: String },
    Postback { title: String, payload: String },
}

/// One card in a carousel reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub actions: Vec<CardAction>,
}

/// What the router decided to say. Converted to the Send API wire shape
/// only at the delivery boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    Text { text: String, choices: Vec<Choice> },
    Cards { items: Vec<Card> },
}

impl Reply {
    /// Create a text reply with quick-reply choices
    pub fn text_with_choices(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Reply::Text {
            text: text.into(),
            choices,
        }
    }

    /// Transcript text for this reply; card replies log a placeholder
    pub fn transcript_text(&self) -> &str {
        match self {
            Reply::Text { text, .. } => text,
            Reply::Cards { .. } => "attachment",
        }
    }

    /// Convert to the Send API wire shape
    pub fn to_outbound(&self) -> OutboundMessage {
        match self {
            Reply::Text { text, choices } => {
                if choices.is_empty() {
                    OutboundMessage::text(text.clone())
                } else {
                    OutboundMessage::with_quick_replies(
                        text.clone(),
                        choices
                            .iter()
                            .map(|c| QuickReply::text(c.label.clone(), c.payload.clone()))
                            .collect(),
                    )
                }
            }
            Reply::Cards { items } => OutboundMessage::generic_template(
                items
                    .iter()
                    .map(|card| TemplateElement {
                        title: card.title.clone(),
                        subtitle: card.subtitle.clone(),
                        image_url: card.image_url.clone(),
                        buttons: card
                            .actions
                            .iter()
                            .map(|action| match action {
                                CardAction::Link { title, url } => TemplateButton::WebUrl {
                                    url: url.clone(),
                                    title: title.clone(),
                                },
                                CardAction::Postback { title, payload } => {
                                    TemplateButton::Postback {
                                        title: title.clone(),
                                        payload: payload.clone(),
                                    }
                                }
                            })
                            .collect(),
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_node_default_is_main_menu() {
        assert_eq!(MenuNode::default(), MenuNode::MainMenu);
        assert_eq!(ConversationState::default().node, MenuNode::MainMenu);
        assert!(ConversationState::default().transcript.is_empty());
    }

    #[test]
    fn test_menu_node_display() {
        assert_eq!(MenuNode::MainMenu.to_string(), "main_menu");
        assert_eq!(MenuNode::TourPackages.to_string(), "tour_packages");
        assert_eq!(MenuNode::BookTour.to_string(), "book_tour");
        assert_eq!(MenuNode::ContactUs.to_string(), "contact_us");
    }

    #[test]
    fn test_text_reply_to_outbound() {
        let reply = Reply::text_with_choices(
            "Please select an option:",
            vec![Choice::new("Tour Packages", "TOUR_PACKAGES")],
        );

        let outbound = reply.to_outbound();
        assert_eq!(outbound.text.as_deref(), Some("Please select an option:"));
        let quick_replies = outbound.quick_replies.unwrap();
        assert_eq!(quick_replies.len(), 1);
        assert_eq!(quick_replies[0].payload, "TOUR_PACKAGES");
        assert!(outbound.attachment.is_none());
    }

    #[test]
    fn test_card_reply_to_outbound() {
        let reply = Reply::Cards {
            items: vec![Card {
                title: "El Nido Island Hopping".to_string(),
                subtitle: None,
                image_url: None,
                actions: vec![CardAction::Postback {
                    title: "Book Now".to_string(),
                    payload: "BOOK_ELNIDO".to_string(),
                }],
            }],
        };

        assert_eq!(reply.transcript_text(), "attachment");

        let outbound = reply.to_outbound();
        assert!(outbound.text.is_none());
        let attachment = outbound.attachment.unwrap();
        assert_eq!(attachment.payload.template_type, "generic");
        assert_eq!(attachment.payload.elements[0].title, "El Nido Island Hopping");
    }
}
