//! Wallet config: which group chat is in scope and how to reach the balance tool.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use balance_oracle::CliBalanceOracle;

/// Settings the command handlers and the balance oracle need.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// GROUP_CHAT_ID: the one group chat where commands are honoured besides private chats.
    pub group_chat_id: Option<i64>,
    /// BALANCE_TOOL_PATH
    pub balance_tool_path: String,
    /// BALANCE_TOOL_ARGS, whitespace separated, placed before the sub-command.
    pub balance_tool_args: Vec<String>,
    /// BALANCE_TOOL_TIMEOUT_SECS
    pub balance_tool_timeout_secs: u64,
    /// BALANCE_UNIT: ticker shown after amounts.
    pub balance_unit: String,
}

impl WalletConfig {
    /// Loads from env. A set but unparsable GROUP_CHAT_ID is an error rather than "no group".
    pub fn from_env() -> Result<Self> {
        let group_chat_id = match env::var("GROUP_CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<i64>()
                    .with_context(|| format!("GROUP_CHAT_ID is not a chat id: {}", raw))?,
            ),
            _ => None,
        };
        let balance_tool_path =
            env::var("BALANCE_TOOL_PATH").unwrap_or_else(|_| "./sedractl".to_string());
        let balance_tool_args = env::var("BALANCE_TOOL_ARGS")
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let balance_tool_timeout_secs = env::var("BALANCE_TOOL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let balance_unit = env::var("BALANCE_UNIT").unwrap_or_else(|_| "SDR".to_string());

        Ok(Self {
            group_chat_id,
            balance_tool_path,
            balance_tool_args,
            balance_tool_timeout_secs,
            balance_unit,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.balance_tool_timeout_secs == 0 {
            anyhow::bail!("BALANCE_TOOL_TIMEOUT_SECS must be at least 1");
        }
        if self.balance_tool_path.trim().is_empty() {
            anyhow::bail!("BALANCE_TOOL_PATH is empty");
        }
        Ok(())
    }

    pub fn balance_tool_timeout(&self) -> Duration {
        Duration::from_secs(self.balance_tool_timeout_secs)
    }

    /// Builds the oracle that shells out to the configured tool.
    pub fn build_oracle(&self) -> CliBalanceOracle {
        CliBalanceOracle::new(self.balance_tool_path.clone(), self.balance_tool_timeout())
            .with_base_args(self.balance_tool_args.clone())
    }
}
