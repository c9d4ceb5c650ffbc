//! The persisted settings record and its validating mutators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SettingsError;
use crate::registry::{self, ProviderInfo, DEFAULT_PROVIDER};

/// Minimum GitHub token length accepted by [`Settings::set_github_token`].
pub const MIN_GITHUB_TOKEN_LEN: usize = 20;

/// Bot settings as stored in `bot_settings.json`.
///
/// Keys of `apiKeys`, `models` and `endpoints` are canonical provider ids from the registry.
/// The record does not require a provider to have both a key and a model; that is checked by
/// [`Settings::ready_credentials`] right before a completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    api_keys: BTreeMap<String, String>,
    models: BTreeMap<String, String>,
    endpoints: BTreeMap<String, String>,
    #[serde(
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    github_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_provider: Option<String>,
}

/// Older settings files store an unset token as `""`.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn provider_info(provider: &str) -> Result<&'static ProviderInfo, SettingsError> {
    registry::lookup(provider).ok_or_else(|| SettingsError::InvalidProvider(provider.to_string()))
}

/// Everything needed to issue one completion request for a provider.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub provider: &'static ProviderInfo,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("provider", &self.provider.id)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("model", &self.model)
            .finish()
    }
}

impl Settings {
    // ---------- Mutators: validate provider, then assign ----------

    pub fn set_api_key(&mut self, provider: &str, key: impl Into<String>) -> Result<(), SettingsError> {
        let info = provider_info(provider)?;
        self.api_keys.insert(info.id.to_string(), key.into());
        Ok(())
    }

    pub fn set_model(&mut self, provider: &str, model: impl Into<String>) -> Result<(), SettingsError> {
        let info = provider_info(provider)?;
        self.models.insert(info.id.to_string(), model.into());
        Ok(())
    }

    /// Sets a custom request URL. Fails with `UnsupportedEndpoint` if the provider does not allow it.
    pub fn set_endpoint(&mut self, provider: &str, url: impl Into<String>) -> Result<(), SettingsError> {
        let info = Self::endpoint_override_target(provider)?;
        self.endpoints.insert(info.id.to_string(), url.into());
        Ok(())
    }

    /// Registry entry of `provider` if it accepts a custom endpoint.
    pub fn endpoint_override_target(provider: &str) -> Result<&'static ProviderInfo, SettingsError> {
        let info = provider_info(provider)?;
        if !info.supports_custom_endpoint {
            return Err(SettingsError::UnsupportedEndpoint(info.id.to_string()));
        }
        Ok(info)
    }

    /// Stores the trimmed token. Only a length check; the token is not verified against GitHub.
    pub fn set_github_token(&mut self, token: &str) -> Result<(), SettingsError> {
        let token = token.trim();
        let actual = token.chars().count();
        if actual < MIN_GITHUB_TOKEN_LEN {
            return Err(SettingsError::TokenTooShort {
                actual,
                min: MIN_GITHUB_TOKEN_LEN,
            });
        }
        self.github_token = Some(token.to_string());
        Ok(())
    }

    pub fn select_active_provider(&mut self, provider: &str) -> Result<(), SettingsError> {
        let info = provider_info(provider)?;
        self.active_provider = Some(info.id.to_string());
        Ok(())
    }

    // ---------- Queries ----------

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }

    pub fn model(&self, provider: &str) -> Option<&str> {
        self.models.get(provider).map(String::as_str)
    }

    pub fn endpoint(&self, provider: &str) -> Option<&str> {
        self.endpoints.get(provider).map(String::as_str)
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    pub fn active_provider(&self) -> Option<&str> {
        self.active_provider.as_deref()
    }

    /// The selected provider, or [`DEFAULT_PROVIDER`] when none is selected.
    pub fn active_provider_or_default(&self) -> &str {
        self.active_provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }

    /// Model configured for `provider`; `InvalidProvider` for unknown ids.
    pub fn current_model(&self, provider: &str) -> Result<Option<&str>, SettingsError> {
        let info = provider_info(provider)?;
        Ok(self.model(info.id))
    }

    /// Custom endpoint if one is set, otherwise the registry default.
    pub fn resolve_endpoint(&self, provider: &str) -> Result<String, SettingsError> {
        let info = provider_info(provider)?;
        Ok(self
            .endpoint(info.id)
            .unwrap_or(info.default_endpoint)
            .to_string())
    }

    /// True iff both an API key and a model are set for `provider`.
    pub fn is_provider_ready(&self, provider: &str) -> bool {
        match registry::lookup(provider) {
            Some(info) => self.api_keys.contains_key(info.id) && self.models.contains_key(info.id),
            None => false,
        }
    }

    /// Credentials for a completion request; `NotReady` names what is missing.
    pub fn ready_credentials(&self, provider: &str) -> Result<ProviderCredentials, SettingsError> {
        let info = provider_info(provider)?;
        let (api_key, model) = match (self.api_key(info.id), self.model(info.id)) {
            (Some(key), Some(model)) => (key, model),
            (key, model) => {
                let missing = match (key.is_none(), model.is_none()) {
                    (true, true) => "API key and model",
                    (true, false) => "API key",
                    _ => "model",
                };
                return Err(SettingsError::NotReady {
                    provider: info.id.to_string(),
                    missing: missing.to_string(),
                });
            }
        };
        Ok(ProviderCredentials {
            provider: info,
            endpoint: self.resolve_endpoint(info.id)?,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}
