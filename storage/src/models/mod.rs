//! Data models for storage (user registrations and balances).
//!
//! Used by WalletRepository and callers of the storage API.

mod balance_record;
mod user_record;

pub use balance_record::BalanceRecord;
pub use user_record::{UserRecord, DEFAULT_USERNAME};
