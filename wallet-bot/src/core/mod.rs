//! Core types and traits: Handler, Bot, Message, HandlerResponse, error, logger.
//! Transport-agnostic; the telegram module converts into these types.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, Result};
pub use logger::{init_stderr_tracing, init_tracing};
pub use types::{Chat, ChatKind, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
