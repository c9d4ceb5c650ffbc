//! Core types and traits: Handler, Bot, Message, HandlerResponse, error, logger.
//! Transport-agnostic; the Telegram layer converts into these types.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, Result};
pub use logger::{init_tracing, install_panic_hook};
pub use types::{
    Chat, Handler, HandlerResponse, Menu, MenuButton, MenuCallback, Message, ToCoreMessage,
    ToCoreUser, User,
};
