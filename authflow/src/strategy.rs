//! Login strategies and the pieces they share.
//!
//! The composition root picks one [`AuthStrategy`]; pages ask it which
//! controls to render and route the submit through the matching helper here.

#[cfg(test)]
#[path = "strategy_test.rs"]
mod strategy_test;

use serde::Serialize;

use crate::flags::{AuthAttempt, Clock, FlagStore, KeyValueStore};
use crate::redirect::{Navigator, RedirectOrchestrator};
use crate::session::{User, email_local_part};
use crate::status::AuthEndpoints;

/// Key under which the demo strategy caches its local profile.
pub const DEMO_USER_KEY: &str = "vivaran-demo-user";

/// OAuth identity providers the backend can hand off to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    GitHub,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::Google, Self::GitHub];

    /// Path segment used by the backend login route.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug().eq_ignore_ascii_case(raw.trim()))
    }
}

/// How the user proves who they are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Full-page hand-off to an identity provider.
    #[default]
    OAuth,
    /// Credentials posted to the backend, which sets the session cookie.
    EmailPassword,
    /// Local-only profile for demos; no backend session.
    Demo,
}

impl AuthStrategy {
    /// Parses `oauth`, `email` or `demo`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "oauth" => Some(Self::OAuth),
            "email" | "email-password" => Some(Self::EmailPassword),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }

    /// `true` when the session lives in a backend cookie that must be probed.
    #[must_use]
    pub fn uses_backend_session(self) -> bool {
        !matches!(self, Self::Demo)
    }

    /// `true` when the login page collects an email and password.
    #[must_use]
    pub fn collects_credentials(self) -> bool {
        !matches!(self, Self::OAuth)
    }
}

/// Problems with what the user typed into the login form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Enter your email address.")]
    MissingEmail,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Enter your password.")]
    MissingPassword,
}

/// Validated login form contents; also the email-login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trim and check the login form.
    ///
    /// # Errors
    ///
    /// The first problem found, in field order.
    pub fn validate(email: &str, password: &str) -> Result<Self, CredentialError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialError::MissingEmail);
        }
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
            None => false,
        };
        if !valid || email.chars().any(char::is_whitespace) {
            return Err(CredentialError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(CredentialError::MissingPassword);
        }
        Ok(Self { email: email.to_owned(), password: password.to_owned() })
    }
}

/// Local profile for the demo strategy, named after the email's local part.
#[must_use]
pub fn demo_user(email: &str) -> User {
    let email = email.trim();
    let local = email_local_part(email).unwrap_or("demo");
    User {
        id: format!("demo-{}", local.to_ascii_lowercase()),
        email: email.to_owned(),
        name: local.to_owned(),
        role: None,
        permissions: None,
        provider: Some("demo".to_owned()),
        created_at: None,
        last_login: None,
        photo_url: None,
    }
}

/// Persist the demo profile.
pub fn save_demo_user(store: &impl KeyValueStore, user: &User) {
    match serde_json::to_string(user) {
        Ok(json) => store.set(DEMO_USER_KEY, &json),
        Err(err) => log::warn!("demo profile not saved: {err}"),
    }
}

/// Read the demo profile back; an unreadable entry is discarded.
pub fn load_demo_user(store: &impl KeyValueStore) -> Option<User> {
    let raw = store.get(DEMO_USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("discarding unreadable demo profile: {err}");
            store.remove(DEMO_USER_KEY);
            None
        }
    }
}

pub fn clear_demo_user(store: &impl KeyValueStore) {
    store.remove(DEMO_USER_KEY);
}

/// Start an OAuth login: record the attempt, then leave for the provider.
pub fn begin_oauth_login<S, C, N>(
    flags: &FlagStore<S, C>,
    orchestrator: &RedirectOrchestrator<N>,
    endpoints: &AuthEndpoints,
    provider: Provider,
) -> AuthAttempt
where
    S: KeyValueStore,
    C: Clock,
    N: Navigator,
{
    let attempt = flags.begin();
    orchestrator.hand_off(&endpoints.login(provider));
    attempt
}
