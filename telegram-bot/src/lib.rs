//! # codegen-bot
//!
//! Telegram bot that asks an LLM to write a bot project, extracts the fenced code blocks into
//! files and publishes them as a GitHub repository. Settings (keys, models, endpoints, GitHub
//! token, active provider) live in a JSON file managed through chat commands.
//!
//! Core (Handler, Bot, Message), chain (HandlerChain), telegram (run_repl, adapters), commands and
//! handlers; library crates provide settings, extraction, completion and publishing.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, install_panic_hook, Bot, BotError, Chat, Handler, HandlerResponse, Menu,
    MenuButton, MenuCallback, Message, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;
pub use commands::{parse_command, BotCommand, ParsedCommand};
pub use components::{
    build_bot_components, build_handler_chain, build_menu_handler, BotComponents,
};
pub use config::{BaseConfig, BotConfig, CodegenConfig};
pub use handlers::{CommandHandler, LoggingHandler, MenuHandler};
pub use runner::run_bot;
pub use telegram::{
    run_repl, TelegramBotAdapter, TelegramCallbackWrapper, TelegramMessageWrapper,
    TelegramUserWrapper,
};
