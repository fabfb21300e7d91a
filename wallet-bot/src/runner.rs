use anyhow::{Context, Result};
use balance_oracle::{format_balance, BalanceOracle};
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::{mask_token, BotConfig, WalletConfig};
use crate::core::init_tracing;
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, open the store, build the chain, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        token = %mask_token(config.bot_token()),
        database_url = %config.database_url(),
        group_chat_id = ?config.group_chat_id(),
        balance_tool = %config.wallet().balance_tool_path,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(
        config.wallet(),
        components.repo.clone(),
        components.oracle.clone(),
        components.bot_adapter.clone(),
        components.bot_username.clone(),
    );

    info!("Bot started successfully");

    run_repl(
        components.teloxide_bot,
        handler_chain,
        components.bot_username,
    )
    .await
}

/// Runs the balance tool once for `address` and returns the formatted balance with its unit.
#[instrument(skip(wallet))]
pub async fn check_balance(wallet: &WalletConfig, address: &str) -> Result<String> {
    wallet.validate()?;
    let oracle = wallet.build_oracle();
    let balance = oracle
        .get_balance(address)
        .await
        .with_context(|| format!("Balance lookup for {} failed", address))?;
    Ok(format!("{} {}", format_balance(balance), wallet.balance_unit))
}
