//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup},
};
use tracing::warn;

use crate::core::{Bot as CoreBot, BotError, Chat, Menu, Result};

#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        // Telegram rejects empty messages.
        if text.trim().is_empty() {
            warn!(chat_id = chat.id, "Skipping empty outgoing message");
            return Ok(());
        }
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(menu.iter().map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.text.clone(), button.data.clone()))
        }));
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
