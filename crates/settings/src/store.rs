//! Settings persistence: the [`SettingsStore`] trait, a JSON file store and an in-memory store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::SettingsError;
use crate::settings::Settings;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "bot_settings.json";

/// One in-memory change applied by [`SettingsStore::update`].
pub type SettingsMutation<'a> =
    Box<dyn FnOnce(&mut Settings) -> Result<(), SettingsError> + Send + 'a>;

/// Load/save surface for settings. Handlers receive it as `Arc<dyn SettingsStore>`.
///
/// No locking: concurrent read-modify-write of the same store can lose an update.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads the full record. A missing or unparsable record yields [`Settings::default`].
    async fn load(&self) -> Settings;

    /// Overwrites the stored record.
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Load, apply `mutation`, save. Nothing is written if the mutation fails.
    async fn update<'a>(&self, mutation: SettingsMutation<'a>) -> Result<Settings, SettingsError> {
        let mut settings = self.load().await;
        mutation(&mut settings)?;
        self.save(&settings).await?;
        Ok(settings)
    }
}

/// Stores settings as pretty-printed JSON (two-space indent) in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_failure(&self, source: io::Error) -> SettingsError {
        SettingsError::StorageWriteFailure {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Default for JsonFileSettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self) -> Settings {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file yet; using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read settings; using defaults");
                return Settings::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Settings file is not valid JSON; using defaults");
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| self.write_failure(io::Error::other(e)))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_failure(e))?;
            }
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.write_failure(e))?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

/// Keeps settings in memory only. Used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<Settings>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Settings {
        self.settings.read().await.clone()
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}
