//! Route guard: a pure allow/redirect decision over the current session.
//!
//! The guard consumes a navigation target and a session snapshot and decides
//! whether navigation proceeds. It performs no I/O and reads nothing beyond
//! its arguments, so it is unit-testable in isolation from any routing
//! machinery.

use crate::auth::Session;
use std::collections::HashMap;

/// The login route, used both as a redirect target and as an entry route.
pub const LOGIN_PATH: &str = "/login";
/// The registration entry route.
pub const REGISTER_PATH: &str = "/register";
/// The authenticated landing route.
pub const HOME_PATH: &str = "/";

/// A navigation attempt, as handed over by the router.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationTarget {
    pub path: String,
    pub requires_auth: bool,
    pub query: HashMap<String, String>,
}

impl NavigationTarget {
    /// A public target (no authentication required).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// A target that requires an authenticated session.
    pub fn protected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: true,
            query: HashMap::new(),
        }
    }

    /// Attaches a query parameter to the target.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

/// The guard's verdict for a navigation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Decides whether a navigation may proceed.
///
/// - A protected target without a session token redirects to the login route.
/// - An entry route (login/register) visited with a valid token redirects
///   home, unless the navigation carries an explicit `role` selection marker,
///   which lets an authenticated user reach a role-specific entry point.
/// - Everything else is allowed.
pub fn decide(target: &NavigationTarget, session: &Session) -> RouteDecision {
    if target.requires_auth && !session.is_authenticated() {
        return RouteDecision::Redirect(LOGIN_PATH.to_string());
    }

    let is_entry_route = target.path == LOGIN_PATH || target.path == REGISTER_PATH;
    if session.is_authenticated() && is_entry_route && !target.query.contains_key("role") {
        return RouteDecision::Redirect(HOME_PATH.to_string());
    }

    RouteDecision::Allow
}
