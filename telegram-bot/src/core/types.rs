//! Core message model and the [`Handler`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 0 when the update has no sender (channel posts).
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    /// Sender id usable for repository naming; `None` when unknown.
    pub fn known_id(&self) -> Option<i64> {
        (self.id > 0).then_some(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// One incoming text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Inline keyboard button: `text` is shown, `data` comes back in a [`MenuCallback`] when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub text: String,
    pub data: String,
}

impl MenuButton {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Rows of buttons attached to a message.
pub type Menu = Vec<Vec<MenuButton>>;

/// A press on an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCallback {
    pub user: User,
    pub chat: Chat,
    pub data: String,
}

/// Result of a handler for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; the handler already replied (or chose not to).
    Stop,
    /// Not for this handler, try next.
    Ignore,
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Chain runs all `before` in order, then `handle` until Stop, then all `after` in reverse.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Return false to stop the chain.
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
