use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::services::stt::DEFAULT_SAMPLE_RATE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub nlu: NluConfig,

    #[serde(default)]
    pub wit: WitConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NluMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NluConfig {
    #[serde(default)]
    pub mode: NluMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitConfig {
    #[serde(default = "default_wit_url")]
    pub api_url: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_wit_url() -> String {
    "https://api.wit.ai/message".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl Default for WitConfig {
    fn default() -> Self {
        Self {
            api_url: default_wit_url(),
            token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Used when an `audio_data` message carries no `sample_rate`.
    #[serde(default = "default_sample_rate")]
    pub default_sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_sample_rate: default_sample_rate(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)
            }
            None => Ok(AppConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nlu.mode == NluMode::Remote && self.wit.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid("remote nlu mode requires wit.token".to_string()));
        }
        if self.wit.timeout_ms == 0 {
            return Err(ConfigError::Invalid("wit.timeout_ms must be greater than zero".to_string()));
        }
        if self.session.default_sample_rate == 0 {
            return Err(ConfigError::Invalid("session.default_sample_rate must be greater than zero".to_string()));
        }
        Ok(())
    }
}
