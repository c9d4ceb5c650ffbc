//! Component factory: builds the collaborators of [`CommandHandler`] from config and assembles the
//! handler chain.

use std::sync::Arc;

use anyhow::{Context, Result};
use bot_settings::{JsonFileSettingsStore, SettingsStore};
use code_extractor::CodeExtractor;
use completion_client::{CompletionClient, HttpCompletionClient};
use github_publisher::{GithubPublisher, RepoPublisher};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{CommandHandler, LoggingHandler, MenuHandler};
use crate::telegram::TelegramBotAdapter;

#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot_username: Arc<RwLock<Option<String>>>,
    /// Outgoing transport used by handlers; tests swap in a mock.
    pub bot: Arc<dyn CoreBot>,
    pub settings: Arc<dyn SettingsStore>,
    pub completion: Arc<dyn CompletionClient>,
    pub publisher: Arc<dyn RepoPublisher>,
    pub extractor: CodeExtractor,
}

fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config);
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let settings: Arc<dyn SettingsStore> =
        Arc::new(JsonFileSettingsStore::new(config.settings_file()));

    let completion: Arc<dyn CompletionClient> = Arc::new(
        HttpCompletionClient::new(config.codegen.llm_timeout())
            .context("Failed to build LLM HTTP client")?,
    );

    let publisher: Arc<dyn RepoPublisher> = Arc::new(
        GithubPublisher::new(
            config.codegen.github_api_url.clone(),
            config.codegen.github_owner.clone(),
        )
        .context("Failed to build GitHub HTTP client")?,
    );

    info!(
        settings_file = %config.settings_file(),
        entry_file = %config.codegen.entry_file,
        github_api_url = %config.codegen.github_api_url,
        llm_timeout_secs = config.codegen.llm_timeout_secs,
        "Components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        bot_username: Arc::new(RwLock::new(None)),
        bot,
        settings,
        completion,
        publisher,
        extractor: CodeExtractor::new(config.codegen.extractor_config()),
    })
}

/// Builds the handler chain (logging → commands).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let commands = CommandHandler::new(
        components.bot.clone(),
        components.settings.clone(),
        components.completion.clone(),
        components.extractor.clone(),
    )
    .with_publisher(components.publisher.clone())
    .with_bot_username(components.bot_username.clone());

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(commands))
}

/// Handler for presses on the `/start` menu buttons.
pub fn build_menu_handler(components: &BotComponents) -> Arc<MenuHandler> {
    Arc::new(MenuHandler::new(components.bot.clone()))
}
