//! Outgoing message transport.
//!
//! Handlers send text, optionally with an inline [`Menu`]; [`crate::telegram::TelegramBotAdapter`]
//! implements [`Bot`] over teloxide and tests substitute a recording mock.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Menu, Message};

#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message with an inline keyboard under it.
    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<()>;

    /// Sends a reply in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
