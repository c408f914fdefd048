use super::*;

fn parse(body: &str) -> AuthStatusResponse {
    serde_json::from_str(body).unwrap()
}

#[test]
fn success_with_user_returns_that_user() {
    let response = parse(r#"{"success":true,"authenticated":true,"user":{"id":"u1","email":"a@b.c","name":"Asha"}}"#);
    let user = interpret(response, PlaceholderPolicy::Synthesize).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.name, "Asha");
}

#[test]
fn success_without_user_synthesizes_placeholder() {
    let response = parse(r#"{"success":true,"authenticated":false}"#);
    let user = interpret(response, PlaceholderPolicy::Synthesize).unwrap();
    assert!(user.is_placeholder());
}

#[test]
fn success_without_user_rejected_under_strict_policy() {
    let response = parse(r#"{"success":true,"authenticated":true}"#);
    assert_eq!(interpret(response, PlaceholderPolicy::Reject), Err(AuthError::MissingUser));
}

#[test]
fn authenticated_flag_is_ignored_when_user_present() {
    let response = parse(r#"{"success":true,"authenticated":false,"user":{"id":"u2"}}"#);
    assert_eq!(interpret(response, PlaceholderPolicy::Reject).unwrap().id, "u2");
}

#[test]
fn failure_carries_backend_message() {
    let response = parse(r#"{"success":false,"authenticated":false,"message":"no session"}"#);
    assert_eq!(
        interpret(response, PlaceholderPolicy::Synthesize),
        Err(AuthError::Rejected("no session".into()))
    );
}

#[test]
fn failure_without_message_gets_default_text() {
    let response = parse(r#"{"success":false}"#);
    assert_eq!(
        interpret(response, PlaceholderPolicy::Synthesize),
        Err(AuthError::Rejected("not authenticated".into()))
    );
}

#[test]
fn empty_body_decodes_as_failure() {
    let response = parse("{}");
    assert!(!response.success);
    assert!(interpret(response, PlaceholderPolicy::Synthesize).is_err());
}

#[test]
fn logout_outcome_follows_success_flag() {
    assert_eq!(interpret_logout(parse(r#"{"success":true}"#)), Ok(()));
    assert_eq!(
        interpret_logout(parse(r#"{"success":false}"#)),
        Err(AuthError::Rejected("Logout failed".into()))
    );
}

#[test]
fn placeholder_policy_parses_known_values() {
    assert_eq!(PlaceholderPolicy::parse("Synthesize"), Some(PlaceholderPolicy::Synthesize));
    assert_eq!(PlaceholderPolicy::parse(" reject "), Some(PlaceholderPolicy::Reject));
    assert_eq!(PlaceholderPolicy::parse("maybe"), None);
}

#[test]
fn endpoints_trim_trailing_slash() {
    let endpoints = AuthEndpoints::new("https://api.example.com/");
    assert_eq!(endpoints.current_user(), "https://api.example.com/auth/supabase/user");
    assert_eq!(endpoints.logout(), "https://api.example.com/auth/supabase/logout");
    assert_eq!(endpoints.login(Provider::GitHub), "https://api.example.com/auth/supabase/login/github");
    assert_eq!(endpoints.providers(), "https://api.example.com/auth/supabase/providers");
}

#[test]
fn providers_response_keeps_known_names() {
    let body = r#"{"providers":["google","apple","github"],"login_urls":{"google":"/auth/supabase/login/google"}}"#;
    let response: ProvidersResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.known_providers(), vec![Provider::Google, Provider::GitHub]);
    assert_eq!(response.login_urls.get("google").map(String::as_str), Some("/auth/supabase/login/google"));
}
