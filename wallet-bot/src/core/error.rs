//! Error types for the bot core.

use thiserror::Error;

/// Errors surfaced by the handler chain. Command failures never get here: the dispatcher turns
/// them into replies, so what remains is the transport failing to deliver.
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
