//! Handlers for the chain: [`LoggingHandler`] around every message and [`CommandHandler`] for the
//! bot commands. [`MenuHandler`] answers the inline menu buttons outside the chain.

mod command_handler;
mod logging;
mod menu;
mod replies;

pub use command_handler::CommandHandler;
pub use logging::{redact_secrets, LoggingHandler};
pub use menu::{main_menu, menu_reply, MenuHandler, MENU_ACTIONS};
pub use replies::{list_models_text, list_providers_text, settings_summary, welcome_text};
