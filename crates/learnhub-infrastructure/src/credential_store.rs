//! File-backed credential store.
//!
//! Persists the session token and last-known profile to
//! `~/.config/learnhub/credentials.json`, surviving client restarts the way
//! browser storage survives page reloads.

use crate::paths::{LearnhubPaths, PathError};
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use learnhub_core::auth::{CredentialStore, StoredCredentials};
use learnhub_core::{LearnhubError, Result};
use std::path::PathBuf;

/// `CredentialStore` implementation over an atomic JSON file.
pub struct FileCredentialStore {
    file: AtomicJsonFile<StoredCredentials>,
}

impl FileCredentialStore {
    /// Creates a store at the default credentials path.
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self::with_path(LearnhubPaths::credentials_file()?))
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        self.file
            .load()
            .map_err(|e| LearnhubError::storage(format!("failed to load credentials: {}", e)))
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        self.file
            .save(credentials)
            .map_err(|e| LearnhubError::storage(format!("failed to save credentials: {}", e)))
    }

    async fn clear(&self) -> Result<()> {
        self.file
            .remove()
            .map_err(|e| LearnhubError::storage(format!("failed to clear credentials: {}", e)))
    }
}
