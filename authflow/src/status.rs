//! Auth status contract: wire DTOs, endpoint URLs and the client trait.
//!
//! DESIGN
//! ======
//! The backend answers every status and logout call with the same envelope
//! (`success`, `authenticated`, optional `user` and `message`). Decoding and
//! interpretation are split: a client implementation only turns HTTP into an
//! [`AuthStatusResponse`] or an [`AuthError`], and [`interpret`] applies the
//! placeholder policy. That keeps the browser binding thin and the decision
//! logic testable here.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::session::User;
use crate::strategy::Provider;

/// Envelope returned by `/auth/supabase/user` and `/auth/supabase/logout`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(default)]
    pub success: bool,
    /// Reported by the backend but not consulted: `success` plus the user
    /// payload decide the outcome.
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `/auth/supabase/providers`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersResponse {
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub login_urls: BTreeMap<String, String>,
}

impl ProvidersResponse {
    /// Advertised providers this client knows how to render, in backend order.
    #[must_use]
    pub fn known_providers(&self) -> Vec<Provider> {
        self.providers
            .iter()
            .filter_map(|name| Provider::parse(name))
            .collect()
    }
}

/// What to do when the backend confirms a session but omits the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Treat the session as authenticated with [`User::placeholder`].
    #[default]
    Synthesize,
    /// Treat the reply as [`AuthError::MissingUser`].
    Reject,
}

impl PlaceholderPolicy {
    /// Parses `"synthesize"` or `"reject"`, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "synthesize" => Some(Self::Synthesize),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Decide whether a status reply means "logged in".
///
/// # Errors
///
/// [`AuthError::Rejected`] for `success: false` (carrying the backend message),
/// [`AuthError::MissingUser`] for a user-less success under
/// [`PlaceholderPolicy::Reject`].
pub fn interpret(response: AuthStatusResponse, policy: PlaceholderPolicy) -> Result<User, AuthError> {
    if !response.success {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "not authenticated".to_owned());
        return Err(AuthError::Rejected(message));
    }
    match (response.user, policy) {
        (Some(user), _) => Ok(user),
        (None, PlaceholderPolicy::Synthesize) => Ok(User::placeholder()),
        (None, PlaceholderPolicy::Reject) => Err(AuthError::MissingUser),
    }
}

/// Decide whether a logout reply confirms the session was dropped.
///
/// # Errors
///
/// [`AuthError::Rejected`] when the backend reports `success: false`.
pub fn interpret_logout(response: AuthStatusResponse) -> Result<(), AuthError> {
    if response.success {
        return Ok(());
    }
    Err(AuthError::Rejected(
        response.message.unwrap_or_else(|| "Logout failed".to_owned()),
    ))
}

/// Credentialed calls against the auth backend.
///
/// Implementations never mutate the session themselves.
#[async_trait(?Send)]
pub trait AuthStatusClient {
    /// `GET /auth/supabase/user`.
    async fn fetch_current_user(&self) -> Result<AuthStatusResponse, AuthError>;

    /// `POST /auth/supabase/logout`.
    async fn logout(&self) -> Result<(), AuthError>;
}

/// URL builder for the auth backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEndpoints {
    base: String,
}

impl AuthEndpoints {
    /// `base` is the backend origin, with or without a trailing slash.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self { base: base.trim().trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn current_user(&self) -> String {
        format!("{}/auth/supabase/user", self.base)
    }

    #[must_use]
    pub fn logout(&self) -> String {
        format!("{}/auth/supabase/logout", self.base)
    }

    /// Provider login URL the browser is handed off to.
    #[must_use]
    pub fn login(&self, provider: Provider) -> String {
        format!("{}/auth/supabase/login/{}", self.base, provider.slug())
    }

    #[must_use]
    pub fn email_login(&self) -> String {
        format!("{}/auth/supabase/login/email", self.base)
    }

    #[must_use]
    pub fn providers(&self) -> String {
        format!("{}/auth/supabase/providers", self.base)
    }
}
