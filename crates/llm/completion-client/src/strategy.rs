//! Request building and response parsing per provider kind.

use bot_settings::ProviderKind;
use serde_json::{json, Value};

use crate::error::ProviderError;

/// `anthropic-version` header sent with every Anthropic request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic requires `max_tokens`; generated projects are long.
pub const ANTHROPIC_MAX_TOKENS: u32 = 8192;

/// How one provider kind shapes its requests and where it puts the reply.
pub trait CompletionStrategy: Send + Sync {
    fn request_url(&self, endpoint: &str, model: &str) -> String;
    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)>;
    fn request_body(&self, model: &str, prompt: &str) -> Value;
    /// Pulls the generated text out of a successful response payload.
    fn extract_text(&self, payload: &Value) -> Result<String, ProviderError>;
}

fn text_at(payload: &Value, pointer: &str) -> Result<String, ProviderError> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            let mut summary = payload.to_string();
            if summary.len() > 300 {
                let mut end = 300;
                while !summary.is_char_boundary(end) {
                    end -= 1;
                }
                summary.truncate(end);
                summary.push('…');
            }
            ProviderError::MalformedProviderResponse(format!("missing {} in {}", pointer, summary))
        })
}

/// OpenAI Chat Completions and compatible gateways (MegaLLM, OpenRouter).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiChatStrategy;

impl CompletionStrategy for OpenAiChatStrategy {
    fn request_url(&self, endpoint: &str, _model: &str) -> String {
        endpoint.to_string()
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![("Authorization", format!("Bearer {}", api_key))]
    }

    fn request_body(&self, model: &str, prompt: &str) -> Value {
        json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
        })
    }

    fn extract_text(&self, payload: &Value) -> Result<String, ProviderError> {
        text_at(payload, "/choices/0/message/content")
    }
}

/// Anthropic Messages API.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicMessagesStrategy;

impl CompletionStrategy for AnthropicMessagesStrategy {
    fn request_url(&self, endpoint: &str, _model: &str) -> String {
        endpoint.to_string()
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ]
    }

    fn request_body(&self, model: &str, prompt: &str) -> Value {
        json!({
            "model": model,
            "max_tokens": ANTHROPIC_MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        })
    }

    fn extract_text(&self, payload: &Value) -> Result<String, ProviderError> {
        text_at(payload, "/content/0/text")
    }
}

/// Gemini `models/{model}:generateContent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiGenerateStrategy;

impl CompletionStrategy for GeminiGenerateStrategy {
    fn request_url(&self, endpoint: &str, model: &str) -> String {
        format!("{}/{}:generateContent", endpoint.trim_end_matches('/'), model)
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![("x-goog-api-key", api_key.to_string())]
    }

    fn request_body(&self, _model: &str, prompt: &str) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        })
    }

    fn extract_text(&self, payload: &Value) -> Result<String, ProviderError> {
        text_at(payload, "/candidates/0/content/parts/0/text")
    }
}

/// Strategy for a provider kind.
pub fn strategy_for(kind: ProviderKind) -> &'static dyn CompletionStrategy {
    match kind {
        ProviderKind::OpenAiCompatible => &OpenAiChatStrategy,
        ProviderKind::Anthropic => &AnthropicMessagesStrategy,
        ProviderKind::Gemini => &GeminiGenerateStrategy,
    }
}
