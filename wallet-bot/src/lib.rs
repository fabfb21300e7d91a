//! # Wallet balance bot
//!
//! Telegram bot that links each user to one wallet address and reports its balance, read from
//! the node's command-line tool. Serves private chats and one configured group.
//!
//! Layout: `core` (Handler, Bot, Message), `chain` (HandlerChain), `handlers` (logging, scope,
//! wallet commands), `telegram` (teloxide adapters and REPL), `config`, `components`, `runner`.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, load_wallet_config, Cli, Commands};

pub use crate::core::{
    init_stderr_tracing, init_tracing, parse_message_id, Bot, Chat, ChatKind, DbotError, Handler,
    HandlerResponse, Message, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{mask_token, BaseConfig, BotConfig, WalletConfig};
pub use handlers::{CommandError, LoggingHandler, ScopeHandler, WalletCommandHandler, HELP_TEXT};
pub use runner::{check_balance, run_bot};
