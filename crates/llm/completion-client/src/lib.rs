//! # Completion client
//!
//! Sends one prompt to an LLM provider and returns the generated text.
//!
//! Each [`bot_settings::ProviderKind`] maps to a [`CompletionStrategy`] that knows the request
//! URL, auth headers, JSON body and where the reply text sits in the response. The strategy is
//! picked once per request by [`strategy_for`]; [`HttpCompletionClient`] does the HTTP call.
//! API keys are only ever logged through [`mask_token`].

mod client;
mod error;
mod strategy;

pub use client::{CompletionClient, CompletionRequest, HttpCompletionClient, DEFAULT_TIMEOUT_SECS};
pub use error::ProviderError;
pub use strategy::{
    strategy_for, AnthropicMessagesStrategy, CompletionStrategy, GeminiGenerateStrategy,
    OpenAiChatStrategy, ANTHROPIC_MAX_TOKENS, ANTHROPIC_VERSION,
};

/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 characters or fewer return "***" so no part of them leaks.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
