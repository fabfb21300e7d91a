//! Outbound side of the transport: sending replies.

use async_trait::async_trait;

use super::error::{DbotError, Result};
use super::types::Message;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `text` as a reply to `message` in the same chat.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}

/// Parses a transport message id string into the numeric Telegram id.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
