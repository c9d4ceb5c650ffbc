//! Settings error types.
//!
//! Returned by [`crate::Settings`] mutators and [`crate::SettingsStore::save`]. All variants are
//! recoverable: the command handler turns them into a reply for the user.

use thiserror::Error;

/// Errors from validating or persisting settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown provider: {0}. Use /list_providers to see supported providers")]
    InvalidProvider(String),

    #[error("Provider {0} does not allow a custom endpoint")]
    UnsupportedEndpoint(String),

    #[error("GitHub token is too short ({actual} characters, at least {min} required)")]
    TokenTooShort { actual: usize, min: usize },

    #[error("Provider {provider} is not ready: set the {missing} first")]
    NotReady { provider: String, missing: String },

    #[error("Failed to write settings to {path}: {source}")]
    StorageWriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
