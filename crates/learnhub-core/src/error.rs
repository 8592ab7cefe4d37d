//! Error types for the LearnHub client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire LearnHub client.
///
/// This is a closed taxonomy: every fallible operation in the client resolves
/// to one of these variants, with automatic conversion from common error
/// types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LearnhubError {
    /// A required field or identifier was missing before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced an HTTP response (DNS, refused, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status other than 401
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server rejected the credentials (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Durable storage error (credential file, config file)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A mutation for the same resource is already pending
    #[error("Operation already in flight for '{0}'")]
    InFlight(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LearnhubError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Api error from a status code and server message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the session token was rejected.
    ///
    /// Only `Unauthorized` (HTTP 401) counts; any other failure must not be
    /// treated as a credential problem.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Returns the message the server attached to the failure, if any.
    ///
    /// Used when surfacing a failed user-initiated operation through the
    /// notification sink.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) => Some(message),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LearnhubError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for LearnhubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LearnhubError>`.
pub type Result<T> = std::result::Result<T, LearnhubError>;
