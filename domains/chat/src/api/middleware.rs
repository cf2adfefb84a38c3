//! Chat domain state shared across webhook handlers

use std::sync::Arc;

use paradise_messenger::MessengerService;

use crate::router::DispatchRouter;

/// Application state for the chat domain
#[derive(Clone)]
pub struct ChatState {
    pub router: Arc<DispatchRouter>,
    pub messenger: Arc<dyn MessengerService>,
    pub verify_token: String,
}
