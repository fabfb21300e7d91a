//! Wallet commands: register, unregister, balance, setname and the help text.
//!
//! Each command runs to completion and sends exactly one reply. Failures never leave the
//! handler: they are logged with their kind and turned into a reply by [`CommandError`].

use std::sync::Arc;

use async_trait::async_trait;
use balance_oracle::{format_balance, to_storage_value, BalanceOracle, Decimal};
use storage::{StorageError, WalletRepository, DEFAULT_USERNAME};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

use super::commands::{match_command_prefix, parse_command, Command, Invocation};
use super::error::CommandError;
use super::replies;

/// Resolves commands (native or group-text prefix), runs them against the store and the
/// balance oracle, and replies to the triggering message.
pub struct WalletCommandHandler {
    repo: WalletRepository,
    oracle: Arc<dyn BalanceOracle>,
    bot: Arc<dyn Bot>,
    group_chat_id: Option<i64>,
    balance_unit: String,
    /// Filled from getMe once the transport is up; `/cmd@name` for other names is ignored.
    bot_username: Arc<RwLock<Option<String>>>,
}

impl WalletCommandHandler {
    pub fn new(
        repo: WalletRepository,
        oracle: Arc<dyn BalanceOracle>,
        bot: Arc<dyn Bot>,
        group_chat_id: Option<i64>,
        balance_unit: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            oracle,
            bot,
            group_chat_id,
            balance_unit: balance_unit.into(),
            bot_username: Arc::new(RwLock::new(None)),
        }
    }

    /// Shares the slot the runner fills with the bot's own username.
    pub fn with_bot_username(mut self, bot_username: Arc<RwLock<Option<String>>>) -> Self {
        self.bot_username = bot_username;
        self
    }

    async fn resolve(&self, message: &Message) -> Option<Invocation> {
        let bot_username = self.bot_username.read().await.clone();
        let bot_username = bot_username.as_deref();

        parse_command(&message.content, bot_username).or_else(|| {
            if message.chat.kind.is_group() && self.group_chat_id == Some(message.chat.id) {
                match_command_prefix(&message.content, bot_username)
            } else {
                None
            }
        })
    }

    async fn dispatch(
        &self,
        message: &Message,
        invocation: &Invocation,
    ) -> std::result::Result<String, CommandError> {
        let user_id = message.user.id;
        let argument = invocation.argument.as_deref();
        match invocation.command {
            Command::Start => Ok(replies::HELP_TEXT.to_string()),
            Command::Register => {
                let address = argument.ok_or(CommandError::MissingArgument(Command::Register))?;
                let username = message
                    .user
                    .username
                    .as_deref()
                    .unwrap_or(DEFAULT_USERNAME);
                self.register(user_id, username, address).await
            }
            Command::Unregister => self.unregister(user_id).await,
            Command::Balance => self.balance(user_id).await,
            Command::SetName => {
                let name = argument.ok_or(CommandError::MissingArgument(Command::SetName))?;
                self.set_name(user_id, name).await
            }
        }
    }

    async fn register(
        &self,
        user_id: i64,
        username: &str,
        address: &str,
    ) -> std::result::Result<String, CommandError> {
        if let Some(owner) = self.repo.find_user_by_address(address).await? {
            if owner.user_id != user_id {
                return Err(CommandError::DuplicateAddress(address.to_string()));
            }
        }

        let balance = self.oracle.get_balance(address).await?;
        self.repo
            .register_wallet(user_id, username, address, to_storage_value(balance))
            .await
            .map_err(|e| match e {
                // Lost a race with another registration of the same address.
                StorageError::AlreadyExists(_) => CommandError::DuplicateAddress(address.to_string()),
                other => CommandError::Storage(other),
            })?;

        Ok(replies::registered(
            address,
            &format_balance(balance),
            &self.balance_unit,
        ))
    }

    async fn unregister(&self, user_id: i64) -> std::result::Result<String, CommandError> {
        let removed = self.repo.delete_user_and_balance(user_id).await?;
        info!(user_id, removed, "Unregistered user");
        Ok(replies::UNREGISTERED.to_string())
    }

    async fn balance(&self, user_id: i64) -> std::result::Result<String, CommandError> {
        let address = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .and_then(|user| user.address)
            .ok_or(CommandError::NotRegistered)?;

        let balance: Decimal = self.oracle.get_balance(&address).await?;
        self.repo
            .update_balance(user_id, to_storage_value(balance))
            .await?;

        Ok(replies::current_balance(
            &format_balance(balance),
            &self.balance_unit,
        ))
    }

    async fn set_name(&self, user_id: i64, name: &str) -> std::result::Result<String, CommandError> {
        if !self.repo.update_username(user_id, name).await? {
            warn!(user_id, name = %name, "setname for unregistered user, nothing stored");
        }
        Ok(replies::name_updated(name))
    }

    fn log_failure(&self, message: &Message, command: Command, err: &CommandError) {
        let user_id = message.user.id;
        let command = command.name();
        match err {
            CommandError::Oracle(e) if e.is_invocation_failure() => {
                error!(user_id, command, error = %e, "Balance tool invocation failed")
            }
            CommandError::Oracle(e) => {
                error!(user_id, command, error = %e, "Balance tool returned a malformed response")
            }
            CommandError::Storage(e) => error!(user_id, command, error = %e, "Record store failure"),
            other => warn!(user_id, command, reason = %other, "Command rejected"),
        }
    }
}

#[async_trait]
impl Handler for WalletCommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(invocation) = self.resolve(message).await else {
            return Ok(HandlerResponse::Ignore);
        };
        info!(
            command = invocation.command.name(),
            argument = ?invocation.argument,
            "Dispatching command"
        );

        let reply = match self.dispatch(message, &invocation).await {
            Ok(text) => text,
            Err(e) => {
                self.log_failure(message, invocation.command, &e);
                e.user_message().to_string()
            }
        };

        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
