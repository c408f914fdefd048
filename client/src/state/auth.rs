//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The completion detector writes
//! [`AuthSession`] values; this struct is the flattened view pages read.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authflow::session::AuthSession;

use crate::net::types::User;

/// Current user plus whether the first session check is still pending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::from(&AuthSession::Unknown)
    }
}

impl From<&AuthSession> for AuthState {
    fn from(session: &AuthSession) -> Self {
        Self { user: session.user().cloned(), loading: session.is_loading() }
    }
}

impl AuthState {
    /// Overwrite with a new session, keeping the current user while a
    /// re-check is in flight.
    pub fn apply(&mut self, session: &AuthSession) {
        match session {
            AuthSession::Checking if self.user.is_some() => {}
            other => *self = Self::from(other),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Greeting name, if signed in.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(User::display_name)
    }

    /// Navbar caption. A confirmed session without a profile shows as
    /// "Signed in" instead of the stand-in name.
    #[must_use]
    pub fn navbar_name(&self) -> Option<String> {
        self.user
            .as_ref()
            .map(|user| if user.is_placeholder() { "Signed in".to_owned() } else { user.display_name() })
    }
}
