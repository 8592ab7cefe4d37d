//! Session and user profile domain models.
//!
//! The session is the authenticated identity currently active in the client.
//! All wire types use the backend's camelCase/`_id` conventions.

use serde::{Deserialize, Serialize};

/// The role a user holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Instructor,
}

impl UserRole {
    /// The wire representation, as sent in query strings and request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
        }
    }
}

/// User profile as served by `GET /auth/user`.
///
/// Owned exclusively by the session manager; other components read it
/// through accessors and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// The authenticated identity and credential currently active in the client.
///
/// `user` is only trusted when `token` is present: a cached profile without a
/// token is a stale artifact and must not authorize protected actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Whether the session holds a credential.
    ///
    /// Decided on the token alone; the cached profile never authorizes.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Clears both halves of the session.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request payload, shared by student and instructor registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update sent to `PUT /auth/update-profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// The durable credential slot, persisted across page loads.
///
/// Token and cached profile are always written and cleared together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}
