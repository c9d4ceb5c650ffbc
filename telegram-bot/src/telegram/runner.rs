//! Long-polling dispatcher: text messages go through the handler chain and inline menu presses go
//! to the [`MenuHandler`], one spawned task per update.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use crate::handlers::MenuHandler;

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    if msg.text().is_none() {
        debug!(chat_id = msg.chat.id.0, "Ignoring non-text message");
        return Ok(());
    }
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(
                error = %e,
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Handler chain failed"
            );
        }
    });
    Ok(())
}

/// Replies to the pressed button, then answers the query so the client stops its spinner.
async fn on_callback(
    bot: teloxide::Bot,
    query: CallbackQuery,
    menu: Arc<MenuHandler>,
) -> ResponseResult<()> {
    let callback = TelegramCallbackWrapper(&query).to_core();
    let query_id = query.id.clone();
    tokio::spawn(async move {
        match callback {
            Some(callback) => {
                if let Err(e) = menu.handle(&callback).await {
                    error!(error = %e, chat_id = callback.chat.id, "Menu callback failed");
                }
            }
            None => debug!("Ignoring callback query without data or message"),
        }
        if let Err(e) = bot.answer_callback_query(query_id).await {
            warn!(error = %e, "answer_callback_query failed");
        }
    });
    Ok(())
}

/// Fetches the bot's username into `bot_username` (needed to parse `/cmd@botname` in groups),
/// then serves updates until the process is stopped.
#[instrument(skip(bot, handler_chain, menu, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    menu: Arc<MenuHandler>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before dispatch");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed as /cmd@bot will be ignored"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain, menu])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
