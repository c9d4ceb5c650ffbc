//! Static provider registry.
//!
//! Every provider id the bot accepts, with its display name, request shape ([`ProviderKind`]),
//! default model, default endpoint and whether users may override the endpoint. Read-only for the
//! lifetime of the process.

/// Request/response shape used by a provider. Selected once per request by the completion client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `POST {endpoint}` with `messages`; reply in `choices[0].message.content`.
    OpenAiCompatible,
    /// Anthropic Messages API; reply in `content[0].text`.
    Anthropic,
    /// Gemini `generateContent`; reply in `candidates[0].content.parts[0].text`.
    Gemini,
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: ProviderKind,
    pub default_model: &'static str,
    pub default_endpoint: &'static str,
    pub supports_custom_endpoint: bool,
    /// Models suggested by `/list_models`. Any model id is accepted by `/set_model`.
    pub known_models: &'static [&'static str],
}

/// Provider used for `/code` when no active provider has been selected.
pub const DEFAULT_PROVIDER: &str = "mega";

pub const PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "openai",
        display_name: "OpenAI",
        kind: ProviderKind::OpenAiCompatible,
        default_model: "gpt-4o-mini",
        default_endpoint: "https://api.openai.com/v1/chat/completions",
        supports_custom_endpoint: true,
        known_models: &["gpt-3.5-turbo", "gpt-4o-mini", "gpt-4o"],
    },
    ProviderInfo {
        id: "mega",
        display_name: "MegaLLM",
        kind: ProviderKind::OpenAiCompatible,
        default_model: "gpt-4o-mini",
        default_endpoint: "https://ai.megallm.io/v1/chat/completions",
        supports_custom_endpoint: true,
        known_models: &[
            "gpt-4o-mini",
            "gpt-4o",
            "claude-sonnet-4-5-20250929",
            "claude-haiku-4-5-20251001",
            "mega-flash",
        ],
    },
    ProviderInfo {
        id: "openrouter",
        display_name: "OpenRouter",
        kind: ProviderKind::OpenAiCompatible,
        default_model: "openai/gpt-4o-mini",
        default_endpoint: "https://openrouter.ai/api/v1/chat/completions",
        supports_custom_endpoint: true,
        known_models: &["openai/gpt-4o-mini", "anthropic/claude-sonnet-4.5"],
    },
    ProviderInfo {
        id: "anthropic",
        display_name: "Anthropic",
        kind: ProviderKind::Anthropic,
        default_model: "claude-sonnet-4-5-20250929",
        default_endpoint: "https://api.anthropic.com/v1/messages",
        supports_custom_endpoint: false,
        known_models: &["claude-sonnet-4-5-20250929", "claude-haiku-4-5-20251001"],
    },
    ProviderInfo {
        id: "gemini",
        display_name: "Google Gemini",
        kind: ProviderKind::Gemini,
        default_model: "gemini-1.5-flash",
        default_endpoint: "https://generativelanguage.googleapis.com/v1beta/models",
        supports_custom_endpoint: false,
        known_models: &["gemini-1.5-flash", "gemini-1.5-pro"],
    },
];

/// Finds a provider by id. Matching ignores ASCII case and surrounding whitespace.
pub fn lookup(id: &str) -> Option<&'static ProviderInfo> {
    let id = id.trim();
    PROVIDERS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Returns true if `id` names a registered provider.
pub fn is_known(id: &str) -> bool {
    lookup(id).is_some()
}

/// Registered provider ids, in registry order.
pub fn provider_ids() -> impl Iterator<Item = &'static str> {
    PROVIDERS.iter().map(|p| p.id)
}
