//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single inbound text message with its sender and chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport message id (Telegram numeric id as string); replies point at it.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
