//! Telegram layer: teloxide types to core types, the [`crate::core::Bot`] implementation and the
//! long-polling dispatcher.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
