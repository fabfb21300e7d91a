//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{BotConfig, WalletConfig};

#[derive(Parser)]
#[command(name = "wallet-bot")]
#[command(about = "Telegram wallet balance bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Query the balance tool once and print the result.
    CheckBalance {
        /// Wallet address to look up
        address: String,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Load only the wallet settings; no bot token needed.
pub fn load_wallet_config() -> Result<WalletConfig> {
    WalletConfig::from_env()
}
