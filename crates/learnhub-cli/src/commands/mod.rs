pub mod auth;
pub mod courses;
pub mod progress;

use crate::sink::TerminalSink;
use anyhow::Result;
use learnhub_api::{ApiClient, ReqwestTransport};
use learnhub_application::{CourseStore, SessionManager};
use learnhub_core::guard::{self, NavigationTarget, RouteDecision};
use learnhub_infrastructure::{ConfigLoader, FileCredentialStore};
use std::sync::Arc;
use std::time::Duration;

/// Everything a command needs, wired once at startup.
pub struct AppContext {
    pub sessions: Arc<SessionManager>,
    pub courses: Arc<CourseStore>,
}

impl AppContext {
    /// Loads configuration, builds the transport/client/store stack, and
    /// restores any persisted session.
    pub async fn bootstrap(api_url: Option<String>) -> Result<Self> {
        let mut config = ConfigLoader::new()?.load()?;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        tracing::debug!(api_base_url = %config.api_base_url, "bootstrapping client");

        let transport = Arc::new(ReqwestTransport::new(
            config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        ));
        let client = Arc::new(ApiClient::new(transport));
        let store = Arc::new(FileCredentialStore::new()?);
        let sink = Arc::new(TerminalSink);

        let sessions = Arc::new(SessionManager::new(client.clone(), store, sink.clone()));
        sessions.hydrate().await?;

        let courses = Arc::new(CourseStore::new(client, sessions.clone(), sink));

        Ok(Self { sessions, courses })
    }

    /// Applies the route guard before a protected command runs.
    pub async fn require_auth(&self, path: &str) -> Result<()> {
        let session = self.sessions.session().await;
        match guard::decide(&NavigationTarget::protected(path), &session) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect(_) => {
                anyhow::bail!("you are not logged in - run `learnhub login` first")
            }
        }
    }
}
