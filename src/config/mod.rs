//! Configuration management.
//!
//! Configuration is an immutable record handed to a source at construction time.
//! It can be loaded from a TOML file with `BOOKRADAR__` environment overrides:
//!
//! ```toml
//! [source]
//! url_pattern = "http://bookradar.org/search/?q={query}&type=all"
//! user_agent = "bookradar/0.1.0"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::DEFAULT_USER_AGENT;

/// Placeholder substituted with the encoded search string
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Search endpoint of bookradar.org
pub const DEFAULT_URL_PATTERN: &str = "http://bookradar.org/search/?q={query}&type=all";

/// Config file name looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "bookradar.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog source settings
    #[serde(default)]
    pub source: BookradarConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the bookradar source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookradarConfig {
    /// Search URL template containing `{query}`
    #[serde(default = "default_url_pattern")]
    pub url_pattern: String,

    /// User agent sent with requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Default request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BookradarConfig {
    fn default() -> Self {
        Self {
            url_pattern: default_url_pattern(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BookradarConfig {
    /// Use a different search URL template
    pub fn with_url_pattern(mut self, url_pattern: impl Into<String>) -> Self {
        self.url_pattern = url_pattern.into();
        self
    }

    /// Default request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_url_pattern() -> String {
    DEFAULT_URL_PATTERN.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix("BOOKRADAR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("bookradar").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}
