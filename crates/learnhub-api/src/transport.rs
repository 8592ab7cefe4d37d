//! HTTP transport abstraction.
//!
//! The rest of the client is written against [`HttpTransport`]; the reqwest
//! implementation lives here, mock implementations live in test modules.

use async_trait::async_trait;
use learnhub_core::{LearnhubError, Result};
use serde_json::Value;
use std::time::Duration;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A single request handed to the transport.
///
/// Paths are backend-relative (`/courses/:id/enroll`); the transport owns the
/// base URL. `bearer` carries the session token, when one is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }
}

/// Any HTTP response, including non-2xx.
///
/// Status interpretation (401 handling, envelope unwrapping) is the
/// client's concern, not the transport's.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// The opaque HTTP capability the client is built on.
///
/// An implementation returns `Ok` for every response the server produced and
/// `Err(Transport)` only when no response exists at all (DNS failure,
/// connection refused, timeout).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Production transport over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport for the given backend base URL.
    ///
    /// A trailing slash on `base_url` is tolerated; request paths always
    /// start with one.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LearnhubError::transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            LearnhubError::transport(format!("failed to read response from {}: {}", url, e))
        })?;

        Ok(ApiResponse {
            status,
            body: parse_body(&text),
        })
    }
}

/// Best-effort body parse: empty bodies become `null`, non-JSON bodies are
/// preserved verbatim as a string so error messages survive.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
