//! Storage crate: wallet registrations and last-known balances.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, BalanceRecord
//! - [`wallet_repo`] – WalletRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager, RetryPolicy

mod error;
mod models;
mod sqlite_pool;
mod wallet_repo;


pub use error::StorageError;
pub use models::{BalanceRecord, UserRecord, DEFAULT_USERNAME};
pub use sqlite_pool::{retry_transient, RetryPolicy, SqlitePoolManager};
pub use wallet_repo::WalletRepository;
