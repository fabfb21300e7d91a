//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use balance_oracle::BalanceOracle;
use std::sync::Arc;
use storage::WalletRepository;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::{BotConfig, WalletConfig};
use crate::core::Bot as CoreBot;
use crate::handlers::{LoggingHandler, ScopeHandler, WalletCommandHandler};
use crate::telegram::TelegramBotAdapter;

/// Dependencies for run_bot; produced by the component factory.
pub struct BotComponents {
    pub repo: WalletRepository,
    pub oracle: Arc<dyn BalanceOracle>,
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

/// Opens the record store (retrying while it is locked), builds the balance oracle and the
/// Telegram client. A store that stays unavailable is fatal.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = WalletRepository::connect(config.database_url(), config.base().retry_policy())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to open record store"
            );
            anyhow::anyhow!("Failed to open record store: {}", e)
        })?;

    let oracle = config.wallet().build_oracle();
    info!(
        program = %oracle.program(),
        timeout_secs = oracle.timeout().as_secs(),
        "Balance tool configured"
    );
    let oracle: Arc<dyn BalanceOracle> = Arc::new(oracle);

    let teloxide_bot = {
        let bot = Bot::new(config.bot_token());
        if let Some(url_str) = config.telegram_api_url() {
            match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            }
        } else {
            bot
        }
    };
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    Ok(BotComponents {
        repo,
        oracle,
        teloxide_bot,
        bot_adapter,
        bot_username: Arc::new(RwLock::new(None)),
    })
}

/// Builds the handler chain (logging → scope → wallet commands).
pub fn build_handler_chain(
    wallet: &WalletConfig,
    repo: WalletRepository,
    oracle: Arc<dyn BalanceOracle>,
    bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    let commands = WalletCommandHandler::new(
        repo,
        oracle,
        bot,
        wallet.group_chat_id,
        wallet.balance_unit.clone(),
    )
    .with_bot_username(bot_username);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ScopeHandler::new(wallet.group_chat_id)))
        .add_handler(Arc::new(commands))
}
