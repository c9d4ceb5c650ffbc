//! # bot-settings
//!
//! Settings record for the code-generation bot and the static [`registry`] of LLM providers.
//!
//! - [`Settings`]: API keys, models, custom endpoints, GitHub token and active provider. Every
//!   mutator validates the provider id against the registry before assigning.
//! - [`SettingsStore`]: load/save surface injected into command handlers. [`JsonFileSettingsStore`]
//!   persists to `bot_settings.json`; [`InMemorySettingsStore`] is used in tests.
//!
//! No transport or network code lives here.

mod error;
pub mod registry;
mod settings;
mod store;

pub use error::SettingsError;
pub use registry::{ProviderInfo, ProviderKind, DEFAULT_PROVIDER, PROVIDERS};
pub use settings::{ProviderCredentials, Settings, MIN_GITHUB_TOKEN_LEN};
pub use store::{
    InMemorySettingsStore, JsonFileSettingsStore, SettingsMutation, SettingsStore,
    DEFAULT_SETTINGS_FILE,
};
