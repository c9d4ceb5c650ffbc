use anyhow::Result;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, build_menu_handler};
use crate::config::BotConfig;
use crate::core::{init_tracing, install_panic_hook};
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, build components and chain, then dispatch updates.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;
    install_panic_hook();

    info!(
        log_file = %config.log_file(),
        telegram_api_url = ?config.telegram_api_url(),
        "Initializing bot"
    );

    let components = build_bot_components(&config)?;
    let handler_chain = build_handler_chain(&components);
    let menu = build_menu_handler(&components);

    info!("Bot started successfully");
    run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        menu,
        components.bot_username.clone(),
    )
    .await
}
