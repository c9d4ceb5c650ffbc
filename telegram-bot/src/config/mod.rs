//! Bot configuration: [`BaseConfig`] (Telegram connection + log file) and [`CodegenConfig`]
//! (settings file, extractor, GitHub, LLM timeout), combined in [`BotConfig`]. Loaded from env.

mod base;
mod bot_config;
mod codegen;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use codegen::CodegenConfig;
