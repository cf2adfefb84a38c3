//! Domain model for the chat domain

pub mod entities;
pub mod event;

pub use entities::{
    Card, CardAction, Choice, ConversationState, MenuNode, Reply, TranscriptEntry, TranscriptRole,
};
pub use event::{Event, MessageEvent, PostbackEvent, WebhookPayload};
