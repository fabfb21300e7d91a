//! User record model.
//!
//! Maps to the `users` table.

use serde::{Deserialize, Serialize};

/// Display name stored when the Telegram user has no username.
pub const DEFAULT_USERNAME: &str = "Unknown";

/// One row from the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Telegram user id (primary key).
    pub user_id: i64,
    /// Display name; set from the Telegram username and changed by /setname.
    pub username: String,
    /// Registered wallet address; unique across users when present.
    pub address: Option<String>,
}
