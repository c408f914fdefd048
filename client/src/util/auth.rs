//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical unauthenticated redirect behavior, and the
//! app-wide login monitor steps aside on routes that run their own detector.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authflow::redirect::{Destination, same_route};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Routes whose page owns completion detection.
pub const DETECTION_ROUTES: [&str; 2] = ["/auth-success", "/oauth-callback"];

/// True once the session check has settled without a user.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// True when `path` renders a page that drives its own detector.
#[must_use]
pub fn route_owns_detection(path: &str) -> bool {
    DETECTION_ROUTES.iter().any(|route| same_route(path, route))
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(
                Destination::Login.path(),
                NavigateOptions { replace: true, ..NavigateOptions::default() },
            );
        }
    });
}
