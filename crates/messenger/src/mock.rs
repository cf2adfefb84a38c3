//! Mock Messenger Service Implementation
//!
//! Stores sent messages in memory for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use crate::{MessengerError, MessengerService, OutboundMessage};
use std::sync::{Arc, Mutex};

/// A message recorded by the mock, with its recipient
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub recipient_id: String,
    pub message: OutboundMessage,
}

/// Mock messenger service that records sent messages for test assertions
#[derive(Debug, Clone, Default)]
pub struct MockMessengerService {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl MockMessengerService {
    /// Create a new mock messenger service
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all recorded messages
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .expect("sent lock poisoned — prior test panicked")
            .clone()
    }

    /// Clear all recorded messages
    pub fn reset(&self) {
        self.sent
            .lock()
            .expect("sent lock poisoned — prior test panicked")
            .clear();
    }

    /// Make every subsequent send fail, for delivery-failure tests
    pub fn set_failing(&self, failing: bool) {
        *self
            .fail_sends
            .lock()
            .expect("fail_sends lock poisoned — prior test panicked") = failing;
    }
}

#[async_trait::async_trait]
impl MessengerService for MockMessengerService {
    async fn send(
        &self,
        recipient_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessengerError> {
        let failing = *self
            .fail_sends
            .lock()
            .map_err(|e| MessengerError::Request(format!("fail_sends lock poisoned: {e}")))?;
        if failing {
            return Err(MessengerError::Response(
                "Send API returned 500: simulated failure".to_string(),
            ));
        }

        tracing::debug!(recipient_id = %recipient_id, "Mock messenger: recording message");
        self.sent
            .lock()
            .map_err(|e| MessengerError::Request(format!("sent lock poisoned: {e}")))?
            .push(SentMessage {
                recipient_id: recipient_id.to_string(),
                message: message.clone(),
            });
        Ok(())
    }
}
