//! Handler implementations: logging, chat scope policy, wallet commands.

mod commands;
mod error;
mod logging;
mod replies;
mod scope;
mod wallet_commands;

pub use commands::{match_command_prefix, parse_command, Command, Invocation, COMMAND_TABLE};
pub use error::CommandError;
pub use logging::LoggingHandler;
pub use replies::HELP_TEXT;
pub use scope::ScopeHandler;
pub use wallet_commands::WalletCommandHandler;
