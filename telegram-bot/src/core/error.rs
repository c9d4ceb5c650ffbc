//! Error types for the bot application.
//!
//! [`BotError`] wraps the library errors so handlers can use `?` across settings, completion and
//! publishing. Every variant is recoverable; [`crate::handlers::CommandHandler`] turns it into a
//! reply.

use bot_settings::SettingsError;
use completion_client::ProviderError;
use github_publisher::PublishError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("LLM request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("GitHub upload failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
