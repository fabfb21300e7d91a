//! Bot configuration: BaseConfig (Telegram + log + DB) + WalletConfig (group scope, balance tool).

mod base;
mod bot_config;
mod wallet;


pub use base::{mask_token, BaseConfig};
pub use bot_config::BotConfig;
pub use wallet::WalletConfig;
