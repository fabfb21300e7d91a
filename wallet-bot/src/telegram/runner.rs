//! REPL runner: converts teloxide text messages to core::Message and passes them to the
//! HandlerChain one at a time.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL. Calls get_me() first to fill `bot_username`.
///
/// Messages are handled strictly one after another: the chain runs under a shared lock, so a
/// slow balance lookup delays later messages but two commands never interleave their
/// read-then-write steps on the store.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed, commands addressed to other bots are not filtered"),
    }

    let chain = handler_chain;
    let turn = Arc::new(Mutex::new(()));
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        let turn = turn.clone();

        async move {
            if msg.text().is_none() {
                debug!(chat_id = msg.chat.id.0, "Skipping non-text message");
                return Ok(());
            }
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            let _turn = turn.lock().await;
            if let Err(e) = chain.handle(&core_msg).await {
                error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
            }
            Ok(())
        }
    })
    .await;

    Ok(())
}
