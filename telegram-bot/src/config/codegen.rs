//! Code generation config: where settings live, how extracted files are named, where to publish.

use anyhow::{anyhow, Result};
use bot_settings::DEFAULT_SETTINGS_FILE;
use code_extractor::{EntryFile, ExtractorConfig, TransportLibrary};
use completion_client::DEFAULT_TIMEOUT_SECS;
use github_publisher::DEFAULT_API_BASE;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// SETTINGS_FILE
    pub settings_file: String,
    /// JS_ENTRY_FILE: `index.js` | `bot.js`
    pub entry_file: EntryFile,
    /// BOT_TRANSPORT_LIBRARY: `telegraf` | `node-telegram-bot-api`
    pub transport: TransportLibrary,
    /// GITHUB_API_URL
    pub github_api_url: String,
    /// GITHUB_OWNER; owner of reused repositories, defaults to the token's user
    pub github_owner: Option<String>,
    /// LLM_TIMEOUT_SECS
    pub llm_timeout_secs: u64,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            settings_file: DEFAULT_SETTINGS_FILE.to_string(),
            entry_file: EntryFile::default(),
            transport: TransportLibrary::default(),
            github_api_url: DEFAULT_API_BASE.to_string(),
            github_owner: None,
            llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CodegenConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let entry_file = match env::var("JS_ENTRY_FILE") {
            Ok(v) => v.parse::<EntryFile>().map_err(|e| anyhow!(e))?,
            Err(_) => defaults.entry_file,
        };
        let transport = match env::var("BOT_TRANSPORT_LIBRARY") {
            Ok(v) => v.parse::<TransportLibrary>().map_err(|e| anyhow!(e))?,
            Err(_) => defaults.transport,
        };
        let llm_timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow!("LLM_TIMEOUT_SECS must be a positive integer, got {}", v))?,
            Err(_) => defaults.llm_timeout_secs,
        };

        Ok(Self {
            settings_file: env::var("SETTINGS_FILE").unwrap_or(defaults.settings_file),
            entry_file,
            transport,
            github_api_url: env::var("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            github_owner: env::var("GITHUB_OWNER").ok().filter(|s| !s.trim().is_empty()),
            llm_timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.github_api_url).is_err() {
            anyhow::bail!("GITHUB_API_URL is not a valid URL: {}", self.github_api_url);
        }
        if self.llm_timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            entry_file: self.entry_file,
            transport: self.transport,
            ..ExtractorConfig::default()
        }
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}
