//! The chain's unit of work, plus the traits transports use to produce core types.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, user::User};
use crate::core::error::Result;

/// Builds a core [`User`] from a transport's user type.
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Builds a core [`Message`] from a transport's message type.
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One stage of the message pipeline. Every hook is optional.
///
/// `before` is a gate (returning false drops the message without a reply), `handle` is where
/// commands run, and `after` observes whatever the chain ended with.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    /// Return `Reply` once the message has been answered; `Ignore`/`Continue` hand it on.
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
