//! The authenticated API client.
//!
//! One `ApiClient` instance corresponds to one session context. The bearer
//! slot replaces the upstream notion of a process-wide default-header map:
//! it is written only by the session manager and read implicitly by every
//! request issued through this client.

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use learnhub_core::{LearnhubError, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HTTP client with a single-writer credential slot.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client over the given transport, with no credential
    /// installed.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            bearer: RwLock::new(None),
        }
    }

    /// Installs or clears the bearer token attached to every subsequent
    /// request.
    ///
    /// Single-writer discipline: only the session manager calls this.
    pub async fn set_bearer(&self, token: Option<String>) {
        let mut bearer = self.bearer.write().await;
        *bearer = token;
    }

    /// Returns the currently installed bearer token.
    pub async fn bearer(&self) -> Option<String> {
        self.bearer.read().await.clone()
    }

    /// Issues a GET request.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.request(Method::Get, path, query.to_vec(), None).await
    }

    /// Issues a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.request(Method::Post, path, Vec::new(), body).await
    }

    /// Issues a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::Put, path, Vec::new(), Some(body)).await
    }

    /// Issues a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::Delete, path, Vec::new(), None).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        let bearer = self.bearer.read().await.clone();

        let response = self
            .transport
            .execute(ApiRequest {
                method,
                path: path.to_string(),
                query,
                body,
                bearer,
            })
            .await?;

        decode(path, response)
    }
}

/// Maps a raw response to the client error taxonomy.
///
/// 401 is distinguished from every other failure so the session layer can
/// react to credential expiry alone.
fn decode(path: &str, response: ApiResponse) -> Result<Value> {
    match response.status {
        200..=299 => Ok(response.body),
        401 => {
            let message = extract_message(&response.body)
                .unwrap_or_else(|| "authentication required".to_string());
            tracing::debug!(path, "request rejected with 401");
            Err(LearnhubError::unauthorized(message))
        }
        status => {
            let message = extract_message(&response.body)
                .unwrap_or_else(|| format!("request to {} failed", path));
            Err(LearnhubError::api(status, message))
        }
    }
}

/// Pulls the human-readable message out of a `{success, data, message}`
/// error body, or out of a plain-text body.
fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
