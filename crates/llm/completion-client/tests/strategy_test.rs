//! Tests for provider strategies: request shape and reply extraction.
//!
//! External interactions: none (pure JSON in, JSON/text out).

use bot_settings::ProviderKind;
use completion_client::{strategy_for, ProviderError, ANTHROPIC_VERSION};
use serde_json::json;

/// **Test: OpenAI-compatible reply text is read from choices[0].message.content.**
#[test]
fn openai_extracts_choice_content() {
    let strategy = strategy_for(ProviderKind::OpenAiCompatible);
    let payload = json!({
        "choices": [{ "message": { "role": "assistant", "content": "```js\nhi\n```" } }]
    });
    assert_eq!(strategy.extract_text(&payload).unwrap(), "```js\nhi\n```");

    let body = strategy.request_body("gpt-4o", "build a bot");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "build a bot");
    assert_eq!(
        strategy.auth_headers("sk-1"),
        vec![("Authorization", "Bearer sk-1".to_string())]
    );
}

/// **Test: Anthropic reply text is read from content[0].text; version header is sent.**
#[test]
fn anthropic_extracts_content_text() {
    let strategy = strategy_for(ProviderKind::Anthropic);
    let payload = json!({ "content": [{ "type": "text", "text": "hello" }] });
    assert_eq!(strategy.extract_text(&payload).unwrap(), "hello");

    let headers = strategy.auth_headers("sk-ant");
    assert!(headers.contains(&("x-api-key", "sk-ant".to_string())));
    assert!(headers.contains(&("anthropic-version", ANTHROPIC_VERSION.to_string())));
    assert!(strategy.request_body("claude", "p")["max_tokens"].is_u64());
}

/// **Test: Gemini URL embeds the model; reply is read from candidates[0].content.parts[0].text.**
#[test]
fn gemini_url_and_extraction() {
    let strategy = strategy_for(ProviderKind::Gemini);
    assert_eq!(
        strategy.request_url("https://example.com/v1beta/models/", "gemini-1.5-flash"),
        "https://example.com/v1beta/models/gemini-1.5-flash:generateContent"
    );
    let payload = json!({
        "candidates": [{ "content": { "parts": [{ "text": "generated" }] } }]
    });
    assert_eq!(strategy.extract_text(&payload).unwrap(), "generated");
    assert_eq!(
        strategy.request_body("m", "prompt")["contents"][0]["parts"][0]["text"],
        "prompt"
    );
}

/// **Test: Missing text field yields MalformedProviderResponse for every kind.**
#[test]
fn missing_text_is_malformed() {
    let error_payload = json!({ "error": { "message": "quota exceeded" } });
    for kind in [
        ProviderKind::OpenAiCompatible,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
    ] {
        let result = strategy_for(kind).extract_text(&error_payload);
        assert!(
            matches!(result, Err(ProviderError::MalformedProviderResponse(ref msg)) if msg.contains("quota exceeded")),
            "{:?}",
            kind
        );
    }

    let empty_choices = json!({ "choices": [] });
    assert!(strategy_for(ProviderKind::OpenAiCompatible)
        .extract_text(&empty_choices)
        .is_err());
}
