//! BotConfig: BaseConfig + CodegenConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, CodegenConfig};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub codegen: CodegenConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            codegen: CodegenConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.codegen.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn settings_file(&self) -> &str {
        &self.codegen.settings_file
    }
}
