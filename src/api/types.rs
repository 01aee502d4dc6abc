//! API request and response types

use crate::runtime::OutgoingReply;
use crate::texts::Keyboard;
use serde::{Deserialize, Serialize};

/// An incoming chat message
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub user_id: i64,
    pub chat_id: i64,
    pub text: String,
}

/// Replies produced for one message, in order
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub replies: Vec<ReplyDto>,
}

/// A single outgoing message
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReplyDto {
    pub chat_id: i64,
    pub text: String,
    /// Reply keyboard rows, `None` leaves the current keyboard alone
    pub keyboard: Option<Vec<Vec<String>>>,
    pub remove_keyboard: bool,
}

impl From<OutgoingReply> for ReplyDto {
    fn from(reply: OutgoingReply) -> Self {
        Self {
            chat_id: reply.chat_id,
            keyboard: reply.keyboard.rows(),
            remove_keyboard: reply.keyboard == Keyboard::Remove,
            text: reply.text,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
