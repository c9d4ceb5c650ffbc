//! Command surface of the bot, parsed with teloxide's [`BotCommands`] derive.

use teloxide::utils::command::{BotCommands, ParseError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(
        description = "save an API key: /set_api_key <provider> <key>",
        parse_with = "split"
    )]
    SetApiKey { provider: String, key: String },
    #[command(
        description = "set the model: /set_model <provider> <model>",
        parse_with = "split"
    )]
    SetModel { provider: String, model: String },
    #[command(
        description = "use a custom endpoint: /set_endpoint <provider> <url>",
        parse_with = "split"
    )]
    SetEndpoint { provider: String, url: String },
    #[command(description = "save the GitHub token: /set_github_token <token>")]
    SetGithubToken(String),
    #[command(description = "choose the provider used by /code: /select_provider <provider>")]
    SelectProvider(String),
    #[command(description = "show the model of a provider: /current_model [provider]")]
    CurrentModel(String),
    #[command(description = "generate a bot project: /code <description>")]
    Code(String),
    #[command(description = "show the current settings (secrets masked)")]
    Settings,
    #[command(description = "list supported providers")]
    ListProviders,
    #[command(description = "list suggested models: /list_models [provider]")]
    ListModels(String),
}

/// Outcome of reading a message as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Command(BotCommand),
    /// A known command with bad arguments; carries the usage line to reply with.
    Invalid { usage: &'static str },
    /// Plain text, an unknown command or a command addressed to another bot.
    NotACommand,
}

/// Usage line for a command name (without the leading `/`).
pub fn usage_for(command: &str) -> Option<&'static str> {
    let usage = match command {
        "set_api_key" => "Format: /set_api_key <provider> <key>",
        "set_model" => "Format: /set_model <provider> <model>",
        "set_endpoint" => "Format: /set_endpoint <provider> <url>",
        "set_github_token" => "Format: /set_github_token <token>",
        "select_provider" => "Format: /select_provider <provider>",
        "current_model" => "Format: /current_model [provider]",
        "code" => "Format: /code <project description>",
        "list_models" => "Format: /list_models [provider]",
        _ => return None,
    };
    Some(usage)
}

fn command_name(text: &str) -> &str {
    let first = text
        .trim_start()
        .trim_start_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or_default();
    first.split('@').next().unwrap_or_default()
}

/// Parses `text` as a command addressed to `bot_username` (or to no bot in particular).
pub fn parse_command(text: &str, bot_username: &str) -> ParsedCommand {
    let text = text.trim();
    if !text.starts_with('/') {
        return ParsedCommand::NotACommand;
    }
    match BotCommand::parse(text, bot_username) {
        Ok(command) => ParsedCommand::Command(command),
        Err(ParseError::UnknownCommand(_)) | Err(ParseError::WrongBotName(_)) => {
            ParsedCommand::NotACommand
        }
        Err(_) => ParsedCommand::Invalid {
            usage: usage_for(command_name(text)).unwrap_or("Invalid command arguments. See /help"),
        },
    }
}

/// Full help text built from the command descriptions.
pub fn help_text() -> String {
    BotCommand::descriptions().to_string()
}
