//! Completion delegate
//!
//! Wraps an `LlmService` with the travel-assistant system prompt, the
//! transcript-to-message mapping, and a bounded timeout so a hung upstream
//! call cannot stall a conversation turn.

use std::sync::Arc;
use std::time::Duration;

use paradise_llm::{CompletionRequest, LlmError, LlmMessage, LlmRole, LlmService};

use crate::domain::{TranscriptEntry, TranscriptRole};

const SYSTEM_PROMPT: &str = "You are a helpful travel assistant for Philippine Paradise Tours. \
You can communicate in multiple languages including English, Tagalog, and other Philippine languages. \
Always be friendly and professional. Provide accurate information about Philippine tourism. \
If you don't know something, be honest and offer to connect the user with a human agent.";

/// Delegate for free-text input with no menu match
pub struct CompletionDelegate {
    service: Arc<dyn LlmService>,
    timeout: Duration,
}

impl CompletionDelegate {
    pub fn new(service: Arc<dyn LlmService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Generate a reply for the given text, using the transcript as context.
    /// A timeout counts as a delegate failure; the caller applies the
    /// apology fallback.
    pub async fn generate(
        &self,
        text: &str,
        transcript: &[TranscriptEntry],
    ) -> Result<String, LlmError> {
        let mut messages: Vec<LlmMessage> = transcript
            .iter()
            .map(|entry| LlmMessage {
                role: match entry.role {
                    TranscriptRole::User | TranscriptRole::Postback => LlmRole::User,
                    TranscriptRole::Bot => LlmRole::Assistant,
                },
                content: entry.text.clone(),
            })
            .collect();
        messages.push(LlmMessage {
            role: LlmRole::User,
            content: text.to_string(),
        });

        let request = CompletionRequest {
            model: String::new(),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            messages,
            max_tokens: None,
        };

        match tokio::time::timeout(self.timeout, self.service.complete(request)).await {
            Ok(Ok(response)) => Ok(response.content),
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "LLM call timed out");
                Err(LlmError::Timeout)
            }
        }
    }
}
