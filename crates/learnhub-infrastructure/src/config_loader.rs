//! Client configuration file loading.
//!
//! Reads `ClientConfig` from `~/.config/learnhub/config.toml`. A missing file
//! is not an error; the defaults point at a local development backend.

use crate::paths::{LearnhubPaths, PathError};
use learnhub_core::config::ClientConfig;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur while loading the configuration file.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    ParseError(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigLoadError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigLoadError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {}

impl From<std::io::Error> for ConfigLoadError {
    fn from(e: std::io::Error) -> Self {
        ConfigLoadError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigLoadError {
    fn from(e: toml::de::Error) -> Self {
        ConfigLoadError::ParseError(e)
    }
}

impl From<PathError> for ConfigLoadError {
    fn from(_: PathError) -> Self {
        ConfigLoadError::ConfigDirNotFound
    }
}

/// Loader for the client configuration file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the default path (~/.config/learnhub/config.toml).
    pub fn new() -> Result<Self, ConfigLoadError> {
        Ok(Self {
            path: LearnhubPaths::config_file()?,
        })
    }

    /// Creates a loader with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: Parsed file, or defaults when the file is absent
    /// - `Err`: The file exists but could not be read or parsed
    pub fn load(&self) -> Result<ClientConfig, ConfigLoadError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
