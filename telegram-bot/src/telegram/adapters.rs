use crate::core::{Chat, Message, MenuCallback, ToCoreMessage, ToCoreUser, User};

pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: i64::try_from(self.0.id.0).unwrap_or_default(),
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
        }
    }
}

fn to_core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let user = self
            .0
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or(User {
                id: 0,
                username: None,
                first_name: None,
            });
        Message {
            id: self.0.id.0.to_string(),
            user,
            chat: to_core_chat(&self.0.chat),
            content: self.0.text().unwrap_or_default().to_string(),
            created_at: self.0.date,
        }
    }
}

pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl TelegramCallbackWrapper<'_> {
    /// `None` when the button press carries no data or its message is no longer known.
    pub fn to_core(&self) -> Option<MenuCallback> {
        let chat = self.0.message.as_ref()?.chat();
        let data = self.0.data.clone()?;
        Some(MenuCallback {
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat: to_core_chat(chat),
            data,
        })
    }
}
