//! Credential store port.
//!
//! Defines the interface for persisting session credentials across restarts.

use super::model::StoredCredentials;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract durable slot for the current session credentials.
///
/// This trait decouples the session manager from the concrete storage
/// mechanism (a JSON file on desktop, browser storage in a WASM build,
/// an in-memory map in tests).
///
/// # Implementation Notes
///
/// The session manager is the single writer. Implementations only need to
/// tolerate concurrent reads at startup.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credentials.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(credentials))`: A session was persisted earlier
    /// - `Ok(None)`: Nothing stored (fresh install or after logout)
    /// - `Err(_)`: Storage could not be read
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Persists the credentials, replacing any previous slot content.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Clears the slot. Must succeed when the slot is already empty.
    async fn clear(&self) -> Result<()>;
}
