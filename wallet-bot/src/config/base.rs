//! Base config: Telegram Bot connection, logging, database. Loaded from env.

use anyhow::Result;
use std::env;
use std::time::Duration;

use storage::RetryPolicy;

/// Base config: Telegram-related, logging, database only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// Record store URL (`sqlite://path` or `sqlite::memory:`)
    pub database_url: String,
    /// Attempts to open a locked database at startup before giving up
    pub db_connect_max_attempts: u32,
    /// Pause between those attempts
    pub db_connect_retry_delay_ms: u64,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://users.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/wallet-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let db_connect_max_attempts = env::var("DB_CONNECT_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let db_connect_retry_delay_ms = env::var("DB_CONNECT_RETRY_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            database_url,
            db_connect_max_attempts,
            db_connect_retry_delay_ms,
        })
    }

    /// Validate config (API URL must parse if set; at least one connect attempt).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.db_connect_max_attempts == 0 {
            anyhow::bail!("DB_CONNECT_MAX_ATTEMPTS must be at least 1");
        }
        Ok(())
    }

    /// Startup retry policy for opening the record store.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.db_connect_max_attempts,
            Duration::from_millis(self.db_connect_retry_delay_ms),
        )
    }
}

/// Masks a bot token for logging: first 4 chars + "***" + last 4 chars.
/// Tokens of 11 chars or fewer become "***" so no part leaks.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
