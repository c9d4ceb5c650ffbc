//! Logs every message on the way in and its outcome on the way out; always continues.

use std::borrow::Cow;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Commands whose arguments are secrets.
const SECRET_COMMANDS: &[&str] = &["/set_api_key", "/set_github_token"];

/// Message text safe to log: arguments of secret-bearing commands are replaced with `***`.
pub fn redact_secrets(content: &str) -> Cow<'_, str> {
    let trimmed = content.trim_start();
    let command = trimmed.split_whitespace().next().unwrap_or_default();
    let bare = command.split('@').next().unwrap_or_default();
    if SECRET_COMMANDS.contains(&bare) && trimmed.len() > command.len() {
        Cow::Owned(format!("{} ***", command))
    } else {
        Cow::Borrowed(content)
    }
}

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %redact_secrets(&message.content),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let outcome = match response {
            HandlerResponse::Continue | HandlerResponse::Ignore => "unhandled",
            HandlerResponse::Stop => "handled",
        };
        info!(
            user_id = message.user.id,
            message_id = %message.id,
            outcome,
            "Processed message"
        );
        Ok(())
    }
}
