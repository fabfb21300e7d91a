//! Balance record model.
//!
//! Maps to the `balances` table; one row per registered user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-known balance for a user's registered address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BalanceRecord {
    pub user_id: i64,
    /// Copy of `users.address` for the same user.
    pub address: String,
    /// Display units (base units / 10^8).
    pub balance: f64,
    /// When the balance was last written.
    pub timestamp: DateTime<Utc>,
}
