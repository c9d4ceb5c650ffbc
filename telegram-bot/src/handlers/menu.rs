//! Inline main menu sent with `/start` and the replies to its buttons.
//!
//! Buttons only explain which command to type; nothing is changed by pressing one.

use std::sync::Arc;

use tracing::{info, warn};

use crate::commands::{help_text, usage_for};
use crate::core::{Bot, Menu, MenuButton, MenuCallback, Result};

/// Callback data of each button, in menu order.
pub const MENU_ACTIONS: &[&str] = &[
    "set_api_key",
    "set_model",
    "current_model",
    "set_github_token",
    "generate_code",
    "help",
];

pub fn main_menu() -> Menu {
    vec![
        vec![
            MenuButton::new("🔑 Set API key", "set_api_key"),
            MenuButton::new("⚙️ Set model", "set_model"),
        ],
        vec![
            MenuButton::new("📋 Current model", "current_model"),
            MenuButton::new("📤 GitHub token", "set_github_token"),
        ],
        vec![
            MenuButton::new("📝 Generate code", "generate_code"),
            MenuButton::new("❓ Help", "help"),
        ],
    ]
}

/// Text sent back for a pressed button; `None` for data the menu never produces.
pub fn menu_reply(data: &str) -> Option<String> {
    let command = match data {
        "help" => return Some(help_text()),
        "generate_code" => "code",
        "set_api_key" | "set_model" | "current_model" | "set_github_token" => data,
        _ => return None,
    };
    usage_for(command).map(|usage| format!("Send the command. {}", usage))
}

/// Answers button presses from the main menu.
pub struct MenuHandler {
    bot: Arc<dyn Bot>,
}

impl MenuHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    pub async fn handle(&self, callback: &MenuCallback) -> Result<()> {
        match menu_reply(&callback.data) {
            Some(text) => {
                info!(
                    user_id = callback.user.id,
                    chat_id = callback.chat.id,
                    action = %callback.data,
                    "Menu button pressed"
                );
                self.bot.send_message(&callback.chat, &text).await
            }
            None => {
                warn!(chat_id = callback.chat.id, data = %callback.data, "Unknown menu action");
                Ok(())
            }
        }
    }
}
