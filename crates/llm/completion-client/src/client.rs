//! HTTP completion client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bot_settings::{ProviderCredentials, ProviderInfo};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::ProviderError;
use crate::mask_token;
use crate::strategy::strategy_for;

/// Default request timeout; code generation responses are slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Max characters of an error body kept in [`ProviderError::Status`].
const ERROR_BODY_LIMIT: usize = 500;

/// One single-prompt completion request.
#[derive(Clone)]
pub struct CompletionRequest {
    pub provider: &'static ProviderInfo,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(credentials: &ProviderCredentials, prompt: impl Into<String>) -> Self {
        Self {
            provider: credentials.provider,
            endpoint: credentials.endpoint.clone(),
            api_key: credentials.api_key.clone(),
            model: credentials.model.clone(),
            prompt: prompt.into(),
        }
    }
}

impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("provider", &self.provider.id)
            .field("endpoint", &self.endpoint)
            .field("api_key", &mask_token(&self.api_key))
            .field("model", &self.model)
            .field("prompt_len", &self.prompt.len())
            .finish()
    }
}

/// Returns the generated text for a prompt. Handlers hold it as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// [`CompletionClient`] over reqwest. No retries.
#[derive(Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
}

impl HttpCompletionClient {
    /// Builds a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Uses an existing reqwest client (shared connection pool, custom TLS, tests).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((i, _)) => format!("{}…", &s[..i]),
        None => s.to_string(),
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    #[instrument(skip(self, request), fields(provider = %request.provider.id, model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let strategy = strategy_for(request.provider.kind);
        let url = strategy.request_url(&request.endpoint, &request.model);

        info!(
            url = %url,
            api_key = %mask_token(&request.api_key),
            prompt_len = request.prompt.len(),
            "Completion request"
        );

        let mut builder = self
            .http
            .post(&url)
            .json(&strategy.request_body(&request.model, &request.prompt));
        for (name, value) in strategy.auth_headers(&request.api_key) {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, ERROR_BODY_LIMIT),
            });
        }

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            ProviderError::MalformedProviderResponse(format!("response is not JSON: {}", e))
        })?;

        if let Some(usage) = payload.get("usage").or_else(|| payload.get("usageMetadata")) {
            debug!(usage = %usage, "Completion usage");
        }

        let text = strategy.extract_text(&payload)?;
        info!(response_len = text.len(), "Completion received");
        Ok(text)
    }
}
