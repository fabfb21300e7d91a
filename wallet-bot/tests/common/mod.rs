//! Shared fixtures: a Bot that records replies, a scripted balance oracle, message builders,
//! and a harness that wires them into the production handler chain over an in-memory store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use balance_oracle::{from_base_units, BalanceOracle, Decimal, OracleError};
use chrono::Utc;
use storage::WalletRepository;
use tokio::sync::RwLock;
use tracing_subscriber::{fmt, EnvFilter};
use wallet_bot::{
    build_handler_chain, Bot, Chat, ChatKind, HandlerChain, HandlerResponse, Message, Result,
    User, WalletConfig,
};

pub const GROUP_ID: i64 = -1001;
pub const OTHER_GROUP_ID: i64 = -2002;

static TRACING_INIT: Once = Once::new();

/// Routes logs to the test writer; `RUST_LOG` controls the level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

/// One reply sent through the bot.
#[derive(Debug, Clone)]
pub struct SentReply {
    pub chat_id: i64,
    pub reply_to: String,
    pub text: String,
}

/// Bot that records every reply instead of calling Telegram.
#[derive(Default)]
pub struct RecordingBot {
    replies: Mutex<Vec<SentReply>>,
}

impl RecordingBot {
    pub fn replies(&self) -> Vec<SentReply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.replies.lock().unwrap().last().map(|r| r.text.clone())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.replies.lock().unwrap().push(SentReply {
            chat_id: message.chat.id,
            reply_to: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// What the balance tool does for one address.
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    /// Succeeds with this many base units.
    Balance(u64),
    /// Exits non-zero.
    Fails,
    /// Prints something that is not the expected JSON.
    Garbage,
}

/// Oracle answering from a script; unknown addresses behave like a failing tool.
#[derive(Default)]
pub struct ScriptedOracle {
    outcomes: Mutex<HashMap<String, ToolOutcome>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn set(&self, address: &str, outcome: ToolOutcome) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(address.to_string(), outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BalanceOracle for ScriptedOracle {
    async fn get_balance(&self, address: &str) -> std::result::Result<Decimal, OracleError> {
        self.calls.lock().unwrap().push(address.to_string());
        let outcome = self.outcomes.lock().unwrap().get(address).cloned();
        match outcome {
            Some(ToolOutcome::Balance(raw)) => Ok(from_base_units(raw)),
            Some(ToolOutcome::Garbage) => Err(OracleError::MalformedResponse(
                "expected value at line 1 column 1".to_string(),
            )),
            Some(ToolOutcome::Fails) | None => Err(OracleError::ToolFailed {
                status: "exit status: 1".to_string(),
                stderr: "rpc error: connection refused".to_string(),
            }),
        }
    }
}

pub fn wallet_config(group_chat_id: Option<i64>) -> WalletConfig {
    WalletConfig {
        group_chat_id,
        balance_tool_path: "./sedractl".to_string(),
        balance_tool_args: Vec::new(),
        balance_tool_timeout_secs: 10,
        balance_unit: "SDR".to_string(),
    }
}

fn user(user_id: i64, username: Option<&str>) -> User {
    User {
        id: user_id,
        username: username.map(str::to_string),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn message_in(chat: Chat, user_id: i64, username: Option<&str>, content: &str) -> Message {
    Message {
        id: "100".to_string(),
        user: user(user_id, username),
        chat,
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

pub fn private_message(user_id: i64, content: &str) -> Message {
    message_in(
        Chat {
            id: user_id,
            kind: ChatKind::Private,
        },
        user_id,
        Some("tester"),
        content,
    )
}

pub fn group_message(chat_id: i64, user_id: i64, content: &str) -> Message {
    message_in(
        Chat {
            id: chat_id,
            kind: ChatKind::Supergroup,
        },
        user_id,
        Some("tester"),
        content,
    )
}

/// Production handler chain over an in-memory store, a recording bot and a scripted oracle.
pub struct Harness {
    pub chain: HandlerChain,
    pub repo: WalletRepository,
    pub bot: Arc<RecordingBot>,
    pub oracle: Arc<ScriptedOracle>,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

impl Harness {
    pub async fn new(group_chat_id: Option<i64>) -> Self {
        Self::with_database("sqlite::memory:", group_chat_id).await
    }

    /// Same wiring over the store at `database_url` (e.g. a file the test also opens directly).
    pub async fn with_database(database_url: &str, group_chat_id: Option<i64>) -> Self {
        init_tracing();
        let repo = WalletRepository::new(database_url)
            .await
            .expect("store must open");
        let bot = Arc::new(RecordingBot::default());
        let oracle = Arc::new(ScriptedOracle::default());
        let bot_username = Arc::new(RwLock::new(None));
        let chain = build_handler_chain(
            &wallet_config(group_chat_id),
            repo.clone(),
            oracle.clone(),
            bot.clone(),
            bot_username.clone(),
        );
        Self {
            chain,
            repo,
            bot,
            oracle,
            bot_username,
        }
    }

    pub async fn send(&self, message: &Message) -> HandlerResponse {
        self.chain
            .handle(message)
            .await
            .expect("handler chain must not fail with a recording bot")
    }

    /// Sends and returns the reply text, failing if there was none.
    pub async fn reply(&self, message: &Message) -> String {
        match self.send(message).await {
            HandlerResponse::Reply(text) => text,
            other => panic!("expected a reply, got {:?}", other),
        }
    }
}

/// Long enough for two stored timestamps to differ.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
