//! Chat scope policy: private chats always, groups only when they are the configured group.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::{Chat, ChatKind, Handler, Message, Result};

/// Stops the chain without a reply for messages from chats the bot does not serve.
#[derive(Debug, Clone)]
pub struct ScopeHandler {
    group_chat_id: Option<i64>,
}

impl ScopeHandler {
    /// `group_chat_id` is the one group or supergroup in scope; `None` serves private chats only.
    pub fn new(group_chat_id: Option<i64>) -> Self {
        Self { group_chat_id }
    }

    pub fn allows(&self, chat: &Chat) -> bool {
        match chat.kind {
            ChatKind::Private => true,
            ChatKind::Group | ChatKind::Supergroup => self.group_chat_id == Some(chat.id),
            ChatKind::Channel => false,
        }
    }
}

#[async_trait]
impl Handler for ScopeHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let allowed = self.allows(&message.chat);
        if !allowed {
            debug!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                chat_kind = ?message.chat.kind,
                "Message outside bot scope, ignored"
            );
        }
        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(id: i64, kind: ChatKind) -> Chat {
        Chat { id, kind }
    }

    #[test]
    fn test_private_chats_always_allowed() {
        assert!(ScopeHandler::new(None).allows(&chat(42, ChatKind::Private)));
        assert!(ScopeHandler::new(Some(-100)).allows(&chat(42, ChatKind::Private)));
    }

    #[test]
    fn test_only_configured_group_allowed() {
        let scope = ScopeHandler::new(Some(-100));
        assert!(scope.allows(&chat(-100, ChatKind::Group)));
        assert!(scope.allows(&chat(-100, ChatKind::Supergroup)));
        assert!(!scope.allows(&chat(-200, ChatKind::Group)));
        assert!(!scope.allows(&chat(-200, ChatKind::Supergroup)));
    }

    #[test]
    fn test_groups_denied_without_configured_group() {
        let scope = ScopeHandler::new(None);
        assert!(!scope.allows(&chat(-100, ChatKind::Group)));
    }

    #[test]
    fn test_channels_denied() {
        let scope = ScopeHandler::new(Some(-100));
        assert!(!scope.allows(&chat(-100, ChatKind::Channel)));
    }
}
