//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line flags (applied by the CLI).

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, ENV_OUTPUT_DIR, ENV_STORE_PATH, STORE_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store settings
    pub store: StoreConfig,

    /// Download settings
    pub export: ExportConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Where records are persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON store document
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Config::default_store_path(),
        }
    }
}

/// Where exports and templates are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving downloads
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither RUST_LOG nor -v/-q is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default store location under the platform data directory
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(STORE_FILE_NAME)
    }

    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Defaults, then `config_file` if given, then process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_STORE_PATH).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides store path", ENV_STORE_PATH);
            self.store.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides output directory", ENV_OUTPUT_DIR);
            self.export.output_dir = PathBuf::from(dir);
        }
    }

    /// Set the store path
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.path = path.into();
        self
    }

    /// Set the download directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export.output_dir = dir.into();
        self
    }

    /// Reject settings no command can work with
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(Error::configuration("Store path cannot be empty"));
        }
        if self.store.path.is_dir() {
            return Err(Error::configuration(format!(
                "Store path '{}' is a directory, expected a file",
                self.store.path.display()
            )));
        }
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration("Output directory cannot be empty"));
        }
        if self.export.output_dir.is_file() {
            return Err(Error::configuration(format!(
                "Output directory '{}' is a file",
                self.export.output_dir.display()
            )));
        }
        Ok(())
    }
}
