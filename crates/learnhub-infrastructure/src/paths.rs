//! Unified path management for LearnHub client files.
//!
//! All durable client state (configuration, persisted credentials) lives
//! under one per-user configuration directory, consistent across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the LearnHub client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/learnhub/          # Config directory
/// ├── config.toml              # Client configuration (backend URL, timeouts)
/// └── credentials.json         # Persisted session token + cached profile
/// ```
pub struct LearnhubPaths;

impl LearnhubPaths {
    /// Returns the learnhub configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/learnhub/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("learnhub"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted credentials file.
    ///
    /// # Security Note
    ///
    /// The file holds the raw session token. It is written with 600
    /// permissions on Unix systems.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }
}
