//! Tests for [`bot_settings::JsonFileSettingsStore`] and [`bot_settings::InMemorySettingsStore`].
//!
//! Uses a temporary directory per test; no shared state.

use bot_settings::{
    InMemorySettingsStore, JsonFileSettingsStore, Settings, SettingsError, SettingsStore,
};
use tempfile::TempDir;

fn populated_settings() -> Settings {
    let mut settings = Settings::default();
    settings.set_api_key("mega", "sk-mega-123").unwrap();
    settings.set_model("mega", "gpt-4o").unwrap();
    settings
        .set_endpoint("openai", "https://proxy.example.com/v1/chat/completions")
        .unwrap();
    settings
        .set_github_token("ghp_0123456789abcdefghijklmnop")
        .unwrap();
    settings.select_active_provider("mega").unwrap();
    settings
}

/// **Test: A missing file loads as the default record.**
#[tokio::test]
async fn load_missing_file_returns_default() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSettingsStore::new(dir.path().join("bot_settings.json"));
    assert_eq!(store.load().await, Settings::default());
    assert!(!store.path().exists());
}

/// **Test: A corrupt file loads as the default record instead of failing.**
#[tokio::test]
async fn load_corrupt_file_returns_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bot_settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileSettingsStore::new(&path);
    assert_eq!(store.load().await, Settings::default());
}

/// **Test: save then load yields an equal record.**
#[tokio::test]
async fn save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSettingsStore::new(dir.path().join("nested").join("bot_settings.json"));
    let settings = populated_settings();

    store.save(&settings).await.unwrap();
    assert_eq!(store.load().await, settings);
}

/// **Test: The file is camelCase JSON with two-space indentation.**
#[tokio::test]
async fn saved_file_format() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSettingsStore::new(dir.path().join("bot_settings.json"));
    store.save(&populated_settings()).await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("{\n  \"apiKeys\": {\n    \"mega\": \"sk-mega-123\""));
    assert!(raw.contains("\"githubToken\": \"ghp_0123456789abcdefghijklmnop\""));
    assert!(raw.contains("\"activeProvider\": \"mega\""));
}

/// **Test: Files written by the older bot (empty githubToken, no endpoints) still load.**
#[tokio::test]
async fn load_legacy_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bot_settings.json");
    std::fs::write(
        &path,
        r#"{ "apiKeys": { "mega": "sk-1" }, "models": { "mega": "gpt-4o" }, "githubToken": "" }"#,
    )
    .unwrap();

    let settings = JsonFileSettingsStore::new(&path).load().await;
    assert_eq!(settings.api_key("mega"), Some("sk-1"));
    assert_eq!(settings.github_token(), None);
    assert_eq!(settings.endpoint("openai"), None);
    assert!(settings.is_provider_ready("mega"));
}

/// **Test: An unwritable location surfaces StorageWriteFailure.**
#[tokio::test]
async fn save_to_directory_fails() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSettingsStore::new(dir.path());
    let result = store.save(&Settings::default()).await;
    assert!(matches!(result, Err(SettingsError::StorageWriteFailure { .. })));
}

/// **Test: update persists a successful mutation and writes nothing when the mutation fails.**
#[tokio::test]
async fn update_applies_or_leaves_untouched() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileSettingsStore::new(dir.path().join("bot_settings.json"));

    let updated = store
        .update(Box::new(|s: &mut Settings| s.set_api_key("openai", "sk-openai")))
        .await
        .unwrap();
    assert_eq!(updated.api_key("openai"), Some("sk-openai"));
    assert_eq!(store.load().await.api_key("openai"), Some("sk-openai"));

    let result = store
        .update(Box::new(|s: &mut Settings| s.set_api_key("unknown", "k")))
        .await;
    assert!(matches!(result, Err(SettingsError::InvalidProvider(_))));
    assert_eq!(store.load().await, updated);
}

/// **Test: The in-memory store behaves like the file store for save/load.**
#[tokio::test]
async fn in_memory_store_round_trip() {
    let store = InMemorySettingsStore::new();
    assert_eq!(store.load().await, Settings::default());
    let settings = populated_settings();
    store.save(&settings).await.unwrap();
    assert_eq!(store.load().await, settings);
}
