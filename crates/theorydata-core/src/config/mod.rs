//! Configuration management for theorydata.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `theorydata.toml` file
//! 3. User config `~/.config/theorydata/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::strategy::{ArgsMode, ExpectedPolicy, StrategyError};

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<StrategyError> for ConfigError {
    fn from(err: StrategyError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How cases become argument lists.
    pub conversion: ConversionConfig,

    /// Display name defaults.
    pub naming: NamingConfig,

    /// Case file discovery.
    pub cases: CasesConfig,

    /// Log output.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./theorydata.toml` (project local)
    /// 2. `~/.config/theorydata/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Path of the per-user config file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(mode) = std::env::var(ENV_ARGS_MODE) {
            self.conversion.mode = mode.parse()?;
        }
        if let Ok(policy) = std::env::var(ENV_EXPECTED_POLICY) {
            self.conversion.expected = policy.parse()?;
        }
        if let Ok(method) = std::env::var(ENV_METHOD_NAME) {
            self.naming.method_name = Some(method).filter(|m| !m.is_empty());
        }
        if let Ok(filter) = std::env::var(ENV_LOG_FILTER) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Conversion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// `whole_object` or `flattened`.
    pub mode: ArgsMode,

    /// `by_exit_mode`, `include` or `trim`.
    pub expected: ExpectedPolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_ARGS_MODE,
            expected: DEFAULT_EXPECTED_POLICY,
        }
    }
}

/// Naming configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Method name used when a case file does not name one.
    pub method_name: Option<String>,
}

/// Case file discovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasesConfig {
    /// File extensions to load (without leading dot).
    pub extensions: Vec<String>,
}

impl Default for CasesConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_CASE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
