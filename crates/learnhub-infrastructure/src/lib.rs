//! Infrastructure adapters for the LearnHub client: path resolution, durable
//! credential storage, configuration loading.

pub mod config_loader;
pub mod credential_store;
pub mod paths;
pub mod storage;

pub use config_loader::{ConfigLoadError, ConfigLoader};
pub use credential_store::FileCredentialStore;
pub use paths::LearnhubPaths;
