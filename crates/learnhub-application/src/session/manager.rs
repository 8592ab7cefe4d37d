//! Session lifecycle: authentication, persistence, credential expiry.

use learnhub_api::{ApiClient, Envelope};
use learnhub_core::auth::{
    CredentialStore, Credentials, ProfileUpdate, Session, Signup, StoredCredentials, UserProfile,
    UserRole,
};
use learnhub_core::notify::{Notification, NotificationSink};
use learnhub_core::{LearnhubError, Result};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Response of the credential-issuing endpoints (`/auth/login`,
/// `/auth/signup`, `/auth/instructor-signup`).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Response of the Google code-exchange endpoints. Carries enough profile
/// data for an optimistic pre-fill while the authoritative record is fetched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FederatedAuthResponse {
    token: String,
    #[serde(rename = "_id", default)]
    id: Option<String>,
    name: String,
    email: String,
    #[serde(default)]
    role: UserRole,
    #[serde(default)]
    profile_image: Option<String>,
}

/// Response of `PUT /auth/update-profile`.
#[derive(Debug, Deserialize)]
struct UpdatedProfileResponse {
    user: UserProfile,
}

/// Owns the session and keeps its three representations consistent: the
/// in-memory `{token, user}` pair, the durable credential slot, and the
/// bearer slot on the API client.
///
/// `SessionManager` is the single writer for all three. Other components
/// read the session through [`SessionManager::session`] and issue requests
/// through the shared client, which carries the credential implicitly.
pub struct SessionManager {
    client: Arc<ApiClient>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn NotificationSink>,
    session: RwLock<Session>,
}

impl SessionManager {
    pub fn new(
        client: Arc<ApiClient>,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
            session: RwLock::new(Session::default()),
        }
    }

    /// Restores the session from the durable slot at startup.
    ///
    /// When a token was persisted, it is installed as the client bearer and
    /// the cached profile (if any) is adopted; otherwise the bearer is
    /// cleared. Idempotent, and never writes the store: a cached profile
    /// without a token is stale and is not adopted.
    pub async fn hydrate(&self) -> Result<()> {
        match self.store.load().await? {
            Some(stored) => {
                tracing::debug!("hydrating session from stored credentials");
                self.client.set_bearer(Some(stored.token.clone())).await;
                let mut session = self.session.write().await;
                session.token = Some(stored.token);
                session.user = stored.user;
            }
            None => {
                self.client.set_bearer(None).await;
                let mut session = self.session.write().await;
                session.clear();
            }
        }
        Ok(())
    }

    /// Authenticates against `POST /auth/login`.
    ///
    /// On success the token is persisted before anything else; the success
    /// notification and the profile fetch follow only after the durable
    /// write. On failure the session is unchanged and the error propagates.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let body = self
            .client
            .post("/auth/login", Some(serde_json::to_value(credentials)?))
            .await?;
        let response: TokenResponse = serde_json::from_value(body)?;

        self.install_token(response.token, None).await?;
        self.notifier
            .notify(Notification::success("Logged in successfully!"));

        self.refresh_profile().await
    }

    /// Registers a student account against `POST /auth/signup`.
    pub async fn register(&self, signup: &Signup) -> Result<UserProfile> {
        self.register_at("/auth/signup", signup).await
    }

    /// Registers an instructor account against `POST /auth/instructor-signup`.
    pub async fn register_instructor(&self, signup: &Signup) -> Result<UserProfile> {
        self.register_at("/auth/instructor-signup", signup).await
    }

    async fn register_at(&self, path: &str, signup: &Signup) -> Result<UserProfile> {
        let body = self
            .client
            .post(path, Some(serde_json::to_value(signup)?))
            .await?;
        let response: TokenResponse = serde_json::from_value(body)?;

        self.install_token(response.token, None).await?;
        self.notifier
            .notify(Notification::success("Account created successfully!"));

        // The session must reflect the newly created identity.
        self.refresh_profile().await
    }

    /// Exchanges a Google authorization code for a session via
    /// `POST /auth/google-login`.
    pub async fn login_with_google(&self, code: &str, role: UserRole) -> Result<UserProfile> {
        self.federated_auth("/auth/google-login", code, role).await
    }

    /// Registers through a Google authorization code via `POST /auth/google`.
    pub async fn register_with_google(&self, code: &str, role: UserRole) -> Result<UserProfile> {
        self.federated_auth("/auth/google", code, role).await
    }

    /// Common tail of the Google code-exchange flows.
    ///
    /// The response embeds a profile which is adopted immediately, so the UI
    /// never shows an unauthenticated flash while the authoritative record
    /// is in flight; `refresh_profile` then reconciles.
    async fn federated_auth(&self, path: &str, code: &str, role: UserRole) -> Result<UserProfile> {
        if code.is_empty() {
            return Err(LearnhubError::validation("authorization code is required"));
        }

        let body = self
            .client
            .post(path, Some(json!({ "code": code, "role": role.as_str() })))
            .await?;
        let response: FederatedAuthResponse = serde_json::from_value(body)?;

        let optimistic = UserProfile {
            id: response.id.unwrap_or_default(),
            name: response.name,
            email: response.email,
            role: response.role,
            profile_image: response.profile_image,
        };

        self.install_token(response.token, Some(optimistic))
            .await?;
        self.notifier
            .notify(Notification::success("Logged in with Google!"));

        self.refresh_profile().await
    }

    /// Fetches the authoritative user record from `GET /auth/user`.
    ///
    /// Success updates and re-persists the profile. A 401 is the single
    /// trigger for full session teardown; any other failure only drops the
    /// in-memory profile, leaving the token (and the durable slot) in place
    /// so a network blip cannot log the user out.
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let result = match self.client.get("/auth/user", &[]).await {
            Ok(body) => serde_json::from_value::<Envelope<UserProfile>>(body)
                .map_err(LearnhubError::from)
                .and_then(Envelope::into_data),
            Err(err) => Err(err),
        };

        match result {
            Ok(profile) => {
                let token = {
                    let mut session = self.session.write().await;
                    session.user = Some(profile.clone());
                    session.token.clone()
                };
                if let Some(token) = token {
                    self.store
                        .save(&StoredCredentials {
                            token,
                            user: Some(profile.clone()),
                        })
                        .await?;
                }
                Ok(profile)
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("session token rejected, tearing down session");
                self.teardown().await;
                self.notifier.notify(Notification::warning(
                    "Your session has expired. Please log in again.",
                ));
                Err(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile refresh failed, keeping token");
                let mut session = self.session.write().await;
                session.user = None;
                Err(err)
            }
        }
    }

    /// Sends profile changes to `PUT /auth/update-profile`.
    ///
    /// On success the cached profile is replaced and re-persisted. On
    /// failure the server's message is surfaced through the notification
    /// sink and the error propagates so the caller can keep its form open.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let result = match self
            .client
            .put("/auth/update-profile", serde_json::to_value(update)?)
            .await
        {
            Ok(body) => {
                serde_json::from_value::<UpdatedProfileResponse>(body).map_err(LearnhubError::from)
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(response) => {
                let token = {
                    let mut session = self.session.write().await;
                    session.user = Some(response.user.clone());
                    session.token.clone()
                };
                if let Some(token) = token {
                    self.store
                        .save(&StoredCredentials {
                            token,
                            user: Some(response.user.clone()),
                        })
                        .await?;
                }
                self.notifier
                    .notify(Notification::success("Profile updated successfully!"));
                Ok(response.user)
            }
            Err(err) => {
                let message = err
                    .server_message()
                    .unwrap_or("Failed to update profile")
                    .to_string();
                self.notifier.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    /// Ends the session: memory, durable slot, and bearer are cleared
    /// together. Safe to call when already logged out.
    pub async fn logout(&self) -> Result<()> {
        {
            let mut session = self.session.write().await;
            session.clear();
        }
        self.client.set_bearer(None).await;
        self.store.clear().await?;

        self.notifier.notify(Notification::success("Logged out."));
        Ok(())
    }

    /// Returns a snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Returns the cached profile, if any.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.session.read().await.user.clone()
    }

    /// Whether a token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Persists the token (with an optional optimistic profile), then
    /// installs it in memory and on the client. Durable-first ordering: a
    /// crash after this call must find the token on disk.
    async fn install_token(&self, token: String, user: Option<UserProfile>) -> Result<()> {
        self.store
            .save(&StoredCredentials {
                token: token.clone(),
                user: user.clone(),
            })
            .await?;
        self.client.set_bearer(Some(token.clone())).await;

        let mut session = self.session.write().await;
        session.token = Some(token);
        session.user = user;
        Ok(())
    }

    /// Clears all three session representations after a credential
    /// rejection. A failure to clear the durable slot is logged and not
    /// propagated: the 401 that triggered the teardown is the error the
    /// caller needs to see.
    async fn teardown(&self) {
        {
            let mut session = self.session.write().await;
            session.clear();
        }
        self.client.set_bearer(None).await;
        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "failed to clear stored credentials");
        }
    }
}
