//! BotConfig: BaseConfig + WalletConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, WalletConfig};

/// Bot config: BaseConfig + WalletConfig. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub wallet: WalletConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let wallet = WalletConfig::from_env()?;
        Ok(Self { base, wallet })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.wallet.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn wallet(&self) -> &WalletConfig {
        &self.wallet
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn group_chat_id(&self) -> Option<i64> {
        self.wallet.group_chat_id
    }
}
