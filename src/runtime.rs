//! Runtime for executing conversations
//!
//! The dispatcher takes one incoming message, runs it through the pure state
//! machine, executes the requested effects and persists the resulting state.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::{ConversationEngine, EngineError};
pub use traits::*;

use crate::texts::Keyboard;
use crate::translate::Translator;
use std::sync::Arc;

/// Type alias for the production engine with concrete implementations
pub type ProductionEngine = ConversationEngine<DatabaseStorage, DatabaseStorage, Arc<dyn Translator>>;

/// A text message delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user_id: i64,
    pub chat_id: i64,
    pub text: String,
}

impl IncomingMessage {
    pub fn new(user_id: i64, chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            text: text.into(),
        }
    }
}

/// A reply for the transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Keyboard,
}
