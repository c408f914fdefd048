use super::*;

fn alice() -> User {
    User { name: "Alice".to_owned(), email: "alice@example.com".to_owned(), ..User::placeholder() }
}

#[test]
fn default_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn authenticated_session_sets_user_and_stops_loading() {
    let state = AuthState::from(&AuthSession::Authenticated(alice()));
    assert!(!state.loading);
    assert_eq!(state.display_name().as_deref(), Some("Alice"));
}

#[test]
fn unauthenticated_session_settles_empty() {
    let mut state = AuthState::from(&AuthSession::Authenticated(alice()));
    state.apply(&AuthSession::Unauthenticated);
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn recheck_keeps_signed_in_user() {
    let mut state = AuthState::from(&AuthSession::Authenticated(alice()));
    state.apply(&AuthSession::Checking);
    assert!(!state.loading);
    assert!(state.is_authenticated());
}

#[test]
fn first_check_marks_loading() {
    let mut state = AuthState::from(&AuthSession::Unauthenticated);
    state.apply(&AuthSession::Checking);
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn navbar_names_placeholder_session_generically() {
    let real = User { id: "u-7".to_owned(), ..alice() };
    let state = AuthState::from(&AuthSession::Authenticated(real));
    assert_eq!(state.navbar_name().as_deref(), Some("Alice"));

    let state = AuthState::from(&AuthSession::Authenticated(User::placeholder()));
    assert_eq!(state.navbar_name().as_deref(), Some("Signed in"));
    assert_eq!(state.display_name().as_deref(), Some("User"));

    assert_eq!(AuthState::from(&AuthSession::Unauthenticated).navbar_name(), None);
}
