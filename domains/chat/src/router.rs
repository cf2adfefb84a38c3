//! Dispatch router: the conversation state machine
//!
//! Given a normalized event and the sender's current state, decides the
//! next state and the reply to emit. Postback payloads dispatch through a
//! table built once at startup; free text goes through keyword
//! classification or the completion delegate. The router owns all writes
//! to the conversation store and never talks to the delivery gateway.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalog::{self, Destination};
use crate::delegate::CompletionDelegate;
use crate::domain::{Event, MenuNode, MessageEvent, PostbackEvent, Reply, TranscriptEntry};
use crate::store::ConversationStore;

/// What a recognized postback payload does
#[derive(Debug, Clone, Copy)]
enum PayloadHandler {
    /// Welcome greeting, reset to the main menu
    Welcome,
    /// Emit a node's prompt; `next` is the transition, if the catalog
    /// defines one for this payload
    Prompt {
        node: MenuNode,
        next: Option<MenuNode>,
    },
    /// Destination page; no state change
    Page(Destination),
    /// Leaf booking confirmation; no state change
    Booking(&'static str),
}

/// A computed reply effect, handed to the transport layer for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub recipient_id: String,
    pub reply: Reply,
}

/// The dispatch router
pub struct DispatchRouter {
    store: Arc<ConversationStore>,
    delegate: Option<CompletionDelegate>,
    handlers: HashMap<&'static str, PayloadHandler>,
}

impl DispatchRouter {
    /// Create a router; the payload dispatch table is built once here
    pub fn new(store: Arc<ConversationStore>, delegate: Option<CompletionDelegate>) -> Self {
        let handlers = HashMap::from([
            ("GET_STARTED", PayloadHandler::Welcome),
            (
                "MAIN_MENU",
                PayloadHandler::Prompt {
                    node: MenuNode::MainMenu,
                    next: Some(MenuNode::MainMenu),
                },
            ),
            (
                "TOUR_PACKAGES",
                PayloadHandler::Prompt {
                    node: MenuNode::TourPackages,
                    next: Some(MenuNode::TourPackages),
                },
            ),
            (
                "BOOK_TOUR",
                PayloadHandler::Prompt {
                    node: MenuNode::BookTour,
                    next: Some(MenuNode::BookTour),
                },
            ),
            (
                "CONTACT_US",
                PayloadHandler::Prompt {
                    node: MenuNode::ContactUs,
                    next: None,
                },
            ),
            ("PALAWAN_TOURS", PayloadHandler::Page(Destination::Palawan)),
            (
                "BORACAY_PACKAGES",
                PayloadHandler::Page(Destination::Boracay),
            ),
            ("CEBU_ADVENTURES", PayloadHandler::Page(Destination::Cebu)),
            (
                "BOOK_ELNIDO",
                PayloadHandler::Booking("El Nido Island Hopping"),
            ),
            (
                "BOOK_UNDERGROUND_RIVER",
                PayloadHandler::Booking("Underground River Tour"),
            ),
            (
                "BOOK_WHITE_BEACH",
                PayloadHandler::Booking("White Beach Getaway"),
            ),
            (
                "BOOK_ADVENTURE",
                PayloadHandler::Booking("Boracay Adventure Package"),
            ),
            (
                "BOOK_WHALE_SHARK",
                PayloadHandler::Booking("Whale Shark Encounter"),
            ),
            (
                "BOOK_CANYONEERING",
                PayloadHandler::Booking("Canyoneering Adventure"),
            ),
        ]);

        Self {
            store,
            delegate,
            handlers,
        }
    }

    /// Process one inbound event: advance the sender's conversation state
    /// and compute the reply effect. The whole turn runs under the sender's
    /// turn lock so duplicate concurrent deliveries cannot interleave.
    pub async fn dispatch(&self, event: Event) -> Outbound {
        let sender_id = event.sender_id().to_string();
        let turn = self.store.turn_lock(&sender_id);
        let _guard = turn.lock().await;

        let reply = match event {
            Event::Postback(postback) => self.handle_postback(postback),
            Event::Message(message) => self.handle_message(message).await,
        };

        // Bot transcript entry is recorded before the reply is handed to
        // the delivery gateway; delivery failures do not roll it back.
        self.store
            .append(&sender_id, TranscriptEntry::bot(reply.transcript_text(), Utc::now()));

        Outbound {
            recipient_id: sender_id,
            reply,
        }
    }

    fn handle_postback(&self, postback: PostbackEvent) -> Reply {
        let PostbackEvent {
            sender_id,
            payload,
            timestamp,
        } = postback;

        tracing::info!(sender_id = %sender_id, payload = %payload, "Handling postback");
        self.store.append(
            &sender_id,
            TranscriptEntry::postback(payload.clone(), event_time(timestamp)),
        );

        match self.handlers.get(payload.as_str()) {
            Some(PayloadHandler::Welcome) => {
                self.store.set_node(&sender_id, MenuNode::MainMenu);
                catalog::welcome()
            }
            Some(PayloadHandler::Prompt { node, next }) => {
                if let Some(next) = next {
                    self.store.set_node(&sender_id, *next);
                }
                catalog::node_prompt(*node)
            }
            Some(PayloadHandler::Page(destination)) => catalog::destination_page(*destination),
            Some(PayloadHandler::Booking(tour_name)) => catalog::booking_confirmation(tour_name),
            None => {
                // Unrecognized payload always resets to the menu root
                tracing::warn!(payload = %payload, "Unknown postback payload, resetting to main menu");
                self.store.set_node(&sender_id, MenuNode::MainMenu);
                catalog::welcome()
            }
        }
    }

    async fn handle_message(&self, message: MessageEvent) -> Reply {
        let MessageEvent {
            sender_id,
            text,
            attachments,
            quick_reply_payload,
            timestamp,
        } = message;

        tracing::info!(
            sender_id = %sender_id,
            has_text = text.is_some(),
            attachments = attachments.len(),
            quick_reply = ?quick_reply_payload,
            "Handling message"
        );

        if let Some(text) = text {
            // Snapshot before appending so the delegate sees prior context
            // plus the current text exactly once.
            let state = self.store.state(&sender_id);
            self.store.append(
                &sender_id,
                TranscriptEntry::user(text.clone(), event_time(timestamp)),
            );

            match state.node {
                MenuNode::MainMenu => match catalog::classify_keywords(&text) {
                    Some(target) => {
                        self.store.set_node(&sender_id, target);
                        catalog::node_prompt(target)
                    }
                    None => {
                        self.delegate_or(&text, &state.transcript, || {
                            catalog::node_prompt(MenuNode::MainMenu)
                        })
                        .await
                    }
                },
                node => {
                    self.delegate_or(&text, &state.transcript, || catalog::node_prompt(node))
                        .await
                }
            }
        } else if !attachments.is_empty() {
            self.store.append(
                &sender_id,
                TranscriptEntry::user("attachment", event_time(timestamp)),
            );
            catalog::attachment_received()
        } else {
            tracing::debug!(sender_id = %sender_id, "Message with no text or attachments");
            catalog::node_prompt(MenuNode::MainMenu)
        }
    }

    /// Delegate free text if a delegate is configured, falling back to the
    /// apology reply on failure; otherwise emit the given static prompt.
    /// State is never changed on this path.
    async fn delegate_or(
        &self,
        text: &str,
        transcript: &[TranscriptEntry],
        fallback_prompt: impl FnOnce() -> Reply,
    ) -> Reply {
        let Some(delegate) = &self.delegate else {
            return fallback_prompt();
        };

        match delegate.generate(text, transcript).await {
            Ok(generated) => catalog::delegate_reply(generated),
            Err(e) => {
                tracing::error!(error = %e, "Completion delegate failed, using apology fallback");
                catalog::apology()
            }
        }
    }
}

fn event_time(timestamp_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_else(Utc::now)
}
