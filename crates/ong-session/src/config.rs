//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use ong_client::ApiConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the session core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Interval between silent refresh attempts, in seconds.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Path of the credential file. `None` keeps credentials in memory only.
    pub store_path: Option<PathBuf>,
}

const fn default_refresh_interval_secs() -> u64 {
    600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            store_path: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path()?)
    }

    /// Loads configuration from a specific path, falling back to defaults
    /// when no file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file exists but cannot be read or
    /// parsed.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|err| ConfigError::Invalid(format!("failed to parse config: {err}")))
    }

    /// Saves configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on serialization or IO failure.
    pub fn save_to(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|err| ConfigError::Invalid(format!("failed to serialize config: {err}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// The default configuration file path (`~/.ong-console/config.toml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the home directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| ConfigError::Invalid("could not determine home directory".to_string()))?;
        Ok(home.join(".ong-console").join("config.toml"))
    }

    /// The silent-refresh interval.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed or incomplete configuration.
    #[error("configuration error: {0}")]
    Invalid(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
