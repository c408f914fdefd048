//! In-memory login state shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session starts `Unknown` on page load, becomes `Checking` while a
//! status request is in flight and settles on `Authenticated` or
//! `Unauthenticated`. Only detector actions and logout move it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Identifier given to the synthesized user when the backend confirms a
/// session without returning a profile.
pub const PLACEHOLDER_USER_ID: &str = "session-user";

/// User profile as returned by the auth backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Display name; may be empty for fresh OAuth accounts.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Identity provider that created the session (e.g. `"google"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    /// Avatar URL.
    #[serde(default, alias = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    /// Stand-in profile for a confirmed session whose user payload is missing.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_USER_ID.to_owned(),
            email: String::new(),
            name: "User".to_owned(),
            role: None,
            permissions: None,
            provider: Some("oauth".to_owned()),
            created_at: None,
            last_login: None,
            photo_url: None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_USER_ID
    }

    /// Name to greet the user with: the profile name, else the email's local
    /// part, else `"User"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
        match email_local_part(&self.email) {
            Some(local) => local.to_owned(),
            None => "User".to_owned(),
        }
    }
}

/// Portion of an email address before `@`, if non-empty.
#[must_use]
pub fn email_local_part(email: &str) -> Option<&str> {
    let local = email.trim().split('@').next().unwrap_or_default().trim();
    if local.is_empty() { None } else { Some(local) }
}

/// What the client currently believes about the login.
///
/// A user is present exactly when the session is `Authenticated`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthSession {
    /// Page just loaded; nothing checked yet.
    #[default]
    Unknown,
    /// A status check is in flight.
    Checking,
    Authenticated(User),
    Unauthenticated,
}

impl AuthSession {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// `true` until the first check has settled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unknown | Self::Checking)
    }
}
