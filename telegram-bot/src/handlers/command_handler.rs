//! Executes bot commands: each command maps to one settings operation or to the code generation
//! flow. Failures become a reply; the chain only sees an error when the reply itself fails.

use std::sync::Arc;

use async_trait::async_trait;
use bot_settings::{registry, Settings, SettingsError, SettingsStore};
use code_extractor::{build_code_prompt, repo_name_for, split_for_telegram, CodeExtractor};
use completion_client::{CompletionClient, CompletionRequest};
use github_publisher::{RepoPublisher, RepoStatus};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::menu::main_menu;
use super::replies::{list_models_text, list_providers_text, settings_summary, welcome_text};
use crate::commands::{help_text, parse_command, usage_for, BotCommand, ParsedCommand};
use crate::core::{Bot, BotError, Handler, HandlerResponse, Message, Result};

pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    settings: Arc<dyn SettingsStore>,
    completion: Arc<dyn CompletionClient>,
    publisher: Option<Arc<dyn RepoPublisher>>,
    extractor: CodeExtractor,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        settings: Arc<dyn SettingsStore>,
        completion: Arc<dyn CompletionClient>,
        extractor: CodeExtractor,
    ) -> Self {
        Self {
            bot,
            settings,
            completion,
            publisher: None,
            extractor,
            bot_username: Arc::new(RwLock::new(None)),
        }
    }

    /// Without a publisher, `/code` always delivers the response as messages.
    pub fn with_publisher(mut self, publisher: Arc<dyn RepoPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Shares the username filled in by the runner, so `/cmd@username` is recognized.
    pub fn with_bot_username(mut self, bot_username: Arc<RwLock<Option<String>>>) -> Self {
        self.bot_username = bot_username;
        self
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<()> {
        self.bot.reply_to(message, text).await
    }

    /// Sends `text` as one message, or as 4000-character parts when it exceeds Telegram's limit.
    async fn send_chunked(&self, message: &Message, text: &str) -> Result<()> {
        for chunk in split_for_telegram(text) {
            self.bot.send_message(&message.chat, chunk).await?;
        }
        Ok(())
    }

    async fn execute(&self, command: BotCommand, message: &Message) -> Result<()> {
        match command {
            BotCommand::Start => {
                self.bot
                    .send_menu(&message.chat, &welcome_text(), &main_menu())
                    .await
            }
            BotCommand::Help => self.reply(message, &help_text()).await,
            BotCommand::SetApiKey { provider, key } => {
                let (p, k) = (provider.as_str(), key.as_str());
                self.settings
                    .update(Box::new(move |s: &mut Settings| s.set_api_key(p, k)))
                    .await?;
                let id = canonical_id(&provider);
                info!(user_id = message.user.id, provider = %id, "API key saved");
                self.reply(message, &format!("API key for {} saved.", id)).await
            }
            BotCommand::SetModel { provider, model } => {
                let (p, m) = (provider.as_str(), model.as_str());
                self.settings
                    .update(Box::new(move |s: &mut Settings| s.set_model(p, m)))
                    .await?;
                let id = canonical_id(&provider);
                info!(user_id = message.user.id, provider = %id, model = %model, "Model saved");
                self.reply(message, &format!("Model for {}: {}", id, model)).await
            }
            BotCommand::SetEndpoint { provider, url } => {
                Settings::endpoint_override_target(&provider)?;
                if reqwest::Url::parse(&url).is_err() {
                    return self
                        .reply(message, &format!("Not a valid URL: {}", url))
                        .await;
                }
                let (p, u) = (provider.as_str(), url.as_str());
                self.settings
                    .update(Box::new(move |s: &mut Settings| s.set_endpoint(p, u)))
                    .await?;
                let id = canonical_id(&provider);
                self.reply(message, &format!("Endpoint for {}: {}", id, url)).await
            }
            BotCommand::SetGithubToken(token) => {
                if token.trim().is_empty() {
                    return self.usage(message, "set_github_token").await;
                }
                let t = token.as_str();
                self.settings
                    .update(Box::new(move |s: &mut Settings| s.set_github_token(t)))
                    .await?;
                info!(user_id = message.user.id, "GitHub token saved");
                self.reply(message, "GitHub token saved.").await
            }
            BotCommand::SelectProvider(provider) => {
                if provider.trim().is_empty() {
                    return self.usage(message, "select_provider").await;
                }
                let p = provider.as_str();
                self.settings
                    .update(Box::new(move |s: &mut Settings| s.select_active_provider(p)))
                    .await?;
                let info = registry::lookup(&provider);
                let name = info.map(|i| i.display_name).unwrap_or(provider.as_str());
                self.reply(message, &format!("Active provider: {}", name)).await
            }
            BotCommand::CurrentModel(provider) => {
                let settings = self.settings.load().await;
                let provider = match provider.trim() {
                    "" => settings.active_provider_or_default().to_string(),
                    p => p.to_string(),
                };
                let text = match settings.current_model(&provider)? {
                    Some(model) => format!("Current model for {}: {}", canonical_id(&provider), model),
                    None => format!(
                        "Model for {} is not set. Use /set_model {} <model>",
                        canonical_id(&provider),
                        canonical_id(&provider)
                    ),
                };
                self.reply(message, &text).await
            }
            BotCommand::Code(description) => {
                let description = description.trim();
                if description.is_empty() {
                    return self.usage(message, "code").await;
                }
                self.generate_code(message, description).await
            }
            BotCommand::Settings => {
                let settings = self.settings.load().await;
                self.reply(message, &settings_summary(&settings)).await
            }
            BotCommand::ListProviders => {
                let settings = self.settings.load().await;
                self.reply(message, &list_providers_text(&settings)).await
            }
            BotCommand::ListModels(provider) => match list_models_text(&provider) {
                Some(text) => self.reply(message, &text).await,
                None => Err(SettingsError::InvalidProvider(provider.trim().to_string()).into()),
            },
        }
    }

    async fn usage(&self, message: &Message, command: &str) -> Result<()> {
        let usage = usage_for(command).unwrap_or("See /help");
        self.reply(message, usage).await
    }

    /// Prompt → completion → extraction → publish, or raw delivery without a GitHub token.
    #[instrument(skip(self, message, description), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn generate_code(&self, message: &Message, description: &str) -> Result<()> {
        let settings = self.settings.load().await;
        let credentials = settings.ready_credentials(settings.active_provider_or_default())?;
        info!(
            provider = %credentials.provider.id,
            model = %credentials.model,
            description_len = description.len(),
            "Generating code"
        );
        self.reply(
            message,
            &format!(
                "Generating code with {} ({})...",
                credentials.provider.display_name, credentials.model
            ),
        )
        .await?;

        let prompt = build_code_prompt(description, self.extractor.config());
        let request = CompletionRequest::new(&credentials, prompt);
        let response = self.completion.complete(&request).await?;
        if response.trim().is_empty() {
            return self.reply(message, "The model returned an empty response.").await;
        }

        let files = self
            .extractor
            .clone()
            .with_description(description)
            .extract_files(&response);
        info!(files = files.len(), "Code generated");

        let (token, publisher) = match (settings.github_token(), &self.publisher) {
            (Some(token), Some(publisher)) => (token, publisher),
            (None, _) => {
                self.reply(
                    message,
                    "Code generated. GitHub token is not set, so nothing was uploaded. Here is the response:",
                )
                .await?;
                return self.send_chunked(message, &response).await;
            }
            (Some(_), None) => {
                self.reply(
                    message,
                    "Code generated. GitHub publishing is disabled. Here is the response:",
                )
                .await?;
                return self.send_chunked(message, &response).await;
            }
        };

        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        self.reply(
            message,
            &format!("Code generated ({}). Uploading to GitHub...", names.join(", ")),
        )
        .await?;

        let repo_name = repo_name_for(message.user.known_id());
        let published = publisher
            .publish(&files, &repo_name, description, token)
            .await?;
        let text = match published.status {
            RepoStatus::Created => format!("Project uploaded to GitHub: {}", published.html_url),
            RepoStatus::AlreadyExists => format!(
                "Repository {} already existed; files were updated: {}",
                published.name, published.html_url
            ),
        };
        self.reply(message, &text).await
    }
}

fn canonical_id(provider: &str) -> &str {
    registry::lookup(provider).map(|p| p.id).unwrap_or(provider)
}

/// User-facing text for a failed command.
fn error_reply(error: &BotError) -> String {
    match error {
        BotError::Settings(SettingsError::NotReady { .. }) => format!(
            "{}.\nUse /set_api_key <provider> <key> and /set_model <provider> <model>.",
            error
        ),
        _ => format!("Error: {}", error),
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let bot_username = self.bot_username.read().await.clone().unwrap_or_default();
        let command = match parse_command(&message.content, &bot_username) {
            ParsedCommand::Command(command) => command,
            ParsedCommand::Invalid { usage } => {
                self.reply(message, usage).await?;
                return Ok(HandlerResponse::Stop);
            }
            ParsedCommand::NotACommand => return Ok(HandlerResponse::Ignore),
        };

        if let Err(e) = self.execute(command, message).await {
            warn!(user_id = message.user.id, chat_id = message.chat.id, error = %e, "Command failed");
            if matches!(e, BotError::Bot(_)) {
                return Err(e);
            }
            self.reply(message, &error_reply(&e)).await?;
        }
        Ok(HandlerResponse::Stop)
    }
}
