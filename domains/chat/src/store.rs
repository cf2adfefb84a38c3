//! In-memory conversation store
//!
//! Process-wide mapping from user id to conversation state. All operations
//! are total: a fresh main-menu state is synthesized on first contact.
//! No persistence; state lives and dies with the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{ConversationState, MenuNode, TranscriptEntry};

#[derive(Default)]
struct UserSlot {
    state: ConversationState,
    /// Serializes a full read-modify-write turn for one user. Distinct
    /// users proceed concurrently; duplicate deliveries for the same user
    /// cannot interleave.
    turn: Arc<tokio::sync::Mutex<()>>,
}

/// Conversation store, injected into the router (never a module singleton)
#[derive(Default)]
pub struct ConversationStore {
    users: Mutex<HashMap<String, UserSlot>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slot<T>(&self, user_id: &str, f: impl FnOnce(&mut UserSlot) -> T) -> T {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        f(users.entry(user_id.to_string()).or_default())
    }

    /// Snapshot of the user's conversation state; never fails
    pub fn state(&self, user_id: &str) -> ConversationState {
        self.with_slot(user_id, |slot| slot.state.clone())
    }

    /// Set the user's current menu node
    pub fn set_node(&self, user_id: &str, node: MenuNode) {
        self.with_slot(user_id, |slot| slot.state.node = node);
    }

    /// Append a transcript entry to the user's conversation
    pub fn append(&self, user_id: &str, entry: TranscriptEntry) {
        self.with_slot(user_id, |slot| slot.state.transcript.push(entry));
    }

    /// Per-user turn lock handle
    pub fn turn_lock(&self, user_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.with_slot(user_id, |slot| Arc::clone(&slot.turn))
    }
}
