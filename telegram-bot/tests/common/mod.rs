//! Test doubles for the command handler: a recording [`Bot`], a scripted completion client and a
//! recording publisher.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use code_extractor::ExtractedFileSet;
use codegen_bot::{Bot, Chat, Menu, MenuCallback, Message, Result, User};
use completion_client::{CompletionClient, CompletionRequest, ProviderError};
use github_publisher::{PublishError, PublishedRepo, RepoPublisher, RepoStatus};

/// Records every outgoing text in order, and the keyboards sent with menus.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(i64, String)>>,
    menus: Mutex<Vec<Menu>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn all_text(&self) -> String {
        self.texts().join("\n")
    }

    pub fn menus(&self) -> Vec<Menu> {
        self.menus.lock().unwrap().clone()
    }

    pub fn chat_ids(&self) -> Vec<i64> {
        self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, menu: &Menu) -> Result<()> {
        self.menus.lock().unwrap().push(menu.clone());
        self.send_message(chat, text).await
    }
}

/// Returns a fixed reply (or a fixed status error) and records each request.
pub struct ScriptedCompletion {
    reply: std::result::Result<String, (u16, String)>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> std::result::Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => Err(ProviderError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// One recorded publish call.
#[derive(Debug, Clone)]
pub struct PublishCall {
    pub files: ExtractedFileSet,
    pub repo_name: String,
    pub description: String,
    pub token: String,
}

#[derive(Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<PublishCall>>,
}

impl RecordingPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoPublisher for RecordingPublisher {
    async fn publish(
        &self,
        files: &ExtractedFileSet,
        repo_name: &str,
        description: &str,
        token: &str,
    ) -> std::result::Result<PublishedRepo, PublishError> {
        self.calls.lock().unwrap().push(PublishCall {
            files: files.clone(),
            repo_name: repo_name.to_string(),
            description: description.to_string(),
            token: token.to_string(),
        });
        Ok(PublishedRepo {
            owner: "octo".to_string(),
            name: repo_name.to_string(),
            html_url: format!("https://github.com/octo/{}", repo_name),
            status: RepoStatus::Created,
            files_written: files.len(),
        })
    }
}

/// Button press with `data` from user 42 in private chat 100.
pub fn menu_press(data: &str) -> MenuCallback {
    MenuCallback {
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
        },
        chat: Chat {
            id: 100,
            chat_type: "private".to_string(),
        },
        data: data.to_string(),
    }
}

/// Text message from user 42 in private chat 100.
pub fn text_message(text: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
        },
        chat: Chat {
            id: 100,
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        created_at: Utc::now(),
    }
}
