//! HTTP adapter for the LearnHub backend.
//!
//! Exposes the transport abstraction, the production reqwest transport, and
//! the session-scoped [`ApiClient`] the rest of the client issues requests
//! through.

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
