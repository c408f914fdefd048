//! Login and logout for each auth strategy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page and navbar call into here. OAuth logins leave the app and
//! are confirmed later by the completion detector; email logins confirm
//! inline; demo logins never touch the network and keep the profile in
//! `localStorage`.
//!
//! ERROR HANDLING
//! ==============
//! Form problems and backend failures both surface as [`LoginError`], whose
//! `Display` is shown verbatim under the form.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use authflow::error::AuthError;
use authflow::flags::{Clock, FlagStore, KeyValueStore};
use authflow::session::{AuthSession, User};
use authflow::status::{AuthStatusClient, AuthStatusResponse, PlaceholderPolicy, interpret};
use authflow::strategy::{
    AuthStrategy, CredentialError, Credentials, Provider, begin_oauth_login, clear_demo_user, demo_user,
    load_demo_user, save_demo_user,
};

use crate::auth::host::BrowserOrchestrator;
use crate::net::api::HttpAuthClient;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("Sign-in failed: {0}")]
    Backend(#[from] AuthError),
}

/// Session restored on load for strategies that keep it in the browser.
///
/// `None` means the backend owns the session and the monitor's probe decides.
#[must_use]
pub fn restore_session(strategy: AuthStrategy, store: &impl KeyValueStore) -> Option<AuthSession> {
    if strategy != AuthStrategy::Demo {
        return None;
    }
    Some(match load_demo_user(store) {
        Some(user) => AuthSession::Authenticated(user),
        None => AuthSession::Unauthenticated,
    })
}

/// Record the attempt and leave for the provider.
pub fn start_oauth<S: KeyValueStore, C: Clock>(
    flags: &FlagStore<S, C>,
    orchestrator: &BrowserOrchestrator,
    client: &HttpAuthClient,
    provider: Provider,
) {
    let attempt = begin_oauth_login(flags, orchestrator, client.endpoints(), provider);
    leptos::logging::log!("oauth login via {} started at {}", provider.slug(), attempt.started_at_ms);
}

/// Demo sign-in: validate the form, then cache a local profile.
///
/// # Errors
///
/// [`LoginError::Credentials`] for an incomplete form.
pub fn demo_login(store: &impl KeyValueStore, email: &str, password: &str) -> Result<User, LoginError> {
    let credentials = Credentials::validate(email, password)?;
    let user = demo_user(&credentials.email);
    save_demo_user(store, &user);
    Ok(user)
}

/// Turn the email-login reply into a user.
///
/// # Errors
///
/// [`LoginError::Backend`] when the request failed or the backend refused.
pub fn complete_email_login(
    reply: Result<AuthStatusResponse, AuthError>,
    policy: PlaceholderPolicy,
) -> Result<User, LoginError> {
    Ok(interpret(reply?, policy)?)
}

/// Email/password sign-in against the backend session.
///
/// # Errors
///
/// See [`LoginError`].
pub async fn email_login(
    client: &HttpAuthClient,
    policy: PlaceholderPolicy,
    email: &str,
    password: &str,
) -> Result<User, LoginError> {
    let credentials = Credentials::validate(email, password)?;
    complete_email_login(client.login_with_email(&credentials).await, policy)
}

/// End the session for `strategy` and forget any local traces of it.
///
/// Local state is cleared even when the backend call fails.
///
/// # Errors
///
/// The backend logout error, after local cleanup.
pub async fn logout<C, S, K>(
    client: &C,
    strategy: AuthStrategy,
    store: &impl KeyValueStore,
    flags: &FlagStore<S, K>,
) -> Result<(), AuthError>
where
    C: AuthStatusClient + ?Sized,
    S: KeyValueStore,
    K: Clock,
{
    let result = if strategy.uses_backend_session() { client.logout().await } else { Ok(()) };
    clear_demo_user(store);
    flags.clear();
    result
}
