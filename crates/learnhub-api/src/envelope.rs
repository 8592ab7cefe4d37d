//! The `{success, data, message}` response envelope.

use learnhub_core::{LearnhubError, Result};
use serde::Deserialize;

/// Standard response wrapper used by the enveloped endpoints.
///
/// Some endpoints (`/auth/login`, `/progress/:id`) return their payload bare;
/// those are deserialized directly and never pass through here.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning an unsuccessful envelope into an error
    /// carrying the server's message.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(LearnhubError::api(200, message));
        }
        self.data
            .ok_or_else(|| LearnhubError::internal("response envelope carried no data"))
    }
}
