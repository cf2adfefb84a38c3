//! Chat domain: conversation state machine, dispatch router, webhook API

pub mod api;
pub mod catalog;
pub mod delegate;
pub mod domain;
pub mod router;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Card, CardAction, Choice, ConversationState, MenuNode, Reply, TranscriptEntry, TranscriptRole,
};
pub use domain::event::{normalize, Event, MessageEvent, PostbackEvent, WebhookPayload};

pub use delegate::CompletionDelegate;
pub use router::{DispatchRouter, Outbound};
pub use store::ConversationStore;

// Re-export API types
pub use api::routes;
pub use api::ChatState;
