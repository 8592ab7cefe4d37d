//! Authentication domain: session, user profile, credential store port.

pub mod model;
pub mod store;

pub use model::{Credentials, ProfileUpdate, Session, Signup, StoredCredentials, UserProfile, UserRole};
pub use store::CredentialStore;
