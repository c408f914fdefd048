use super::*;
use authflow::session::User;

#[test]
fn loading_state_never_redirects() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn settled_without_user_redirects() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn settled_with_user_stays() {
    let state = AuthState { user: Some(User::placeholder()), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn detection_routes_tolerate_trailing_slash_and_query() {
    assert!(route_owns_detection("/auth-success"));
    assert!(route_owns_detection("/auth-success/"));
    assert!(route_owns_detection("/oauth-callback?code=abc"));
    assert!(!route_owns_detection("/dashboard"));
    assert!(!route_owns_detection("/"));
}
