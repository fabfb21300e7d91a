//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    /// The store stayed locked or busy for every attempt of a [`crate::RetryPolicy`].
    #[error("Database unavailable after {attempts} attempt(s): {last_error}")]
    Unavailable { attempts: u32, last_error: String },
    /// A uniqueness constraint rejected the write (e.g. an address owned by another user).
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::AlreadyExists(db_err.message().to_string())
            }
            _ => StorageError::Database(err.to_string()),
        }
    }
}
