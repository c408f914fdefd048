use std::collections::VecDeque;

use super::*;
use crate::session::User;

const SEC: Duration = Duration::from_secs(1);

fn ok_user(id: &str) -> Result<AuthStatusResponse, AuthError> {
    Ok(AuthStatusResponse {
        success: true,
        authenticated: true,
        user: Some(User { id: id.into(), ..User::placeholder() }),
        message: None,
    })
}

fn rejected(message: &str) -> Result<AuthStatusResponse, AuthError> {
    Ok(AuthStatusResponse { success: false, message: Some(message.into()), ..AuthStatusResponse::default() })
}

fn offline() -> Result<AuthStatusResponse, AuthError> {
    Err(AuthError::Transport("offline".into()))
}

/// Everything a synchronous run produced.
#[derive(Default)]
struct Trace {
    fetches: usize,
    waits: Vec<Duration>,
    navigations: Vec<Handoff>,
    sessions: Vec<AuthSession>,
    statuses: Vec<StatusLine>,
    flag_clears: usize,
    teardowns: usize,
}

/// Execute actions inline, answering fetches from `replies`.
fn run(
    detector: &mut CompletionDetector,
    initial: Vec<Action>,
    replies: &mut VecDeque<Result<AuthStatusResponse, AuthError>>,
) -> Trace {
    let mut trace = Trace::default();
    let mut queue: VecDeque<Action> = initial.into();
    while let Some(action) = queue.pop_front() {
        match action {
            Action::Schedule(delay) => {
                trace.waits.push(delay);
                queue.extend(detector.timer_fired());
            }
            Action::FetchStatus { .. } => {
                trace.fetches += 1;
                let reply = replies.pop_front().unwrap_or_else(offline);
                queue.extend(detector.on_status(reply));
            }
            Action::Status(line) => trace.statuses.push(line),
            Action::Session(session) => trace.sessions.push(session),
            Action::ClearFlag => trace.flag_clears += 1,
            Action::Teardown => trace.teardowns += 1,
            Action::Navigate(handoff) => trace.navigations.push(handoff),
        }
    }
    trace
}

fn mount(detector: &mut CompletionDetector, active: bool, replies: Vec<Result<AuthStatusResponse, AuthError>>) -> Trace {
    let initial = detector.trigger(Trigger::Mount, active);
    run(detector, initial, &mut VecDeque::from(replies))
}

#[test]
fn auth_success_page_waits_before_first_check() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let actions = detector.trigger(Trigger::Mount, false);
    assert_eq!(
        actions,
        vec![
            Action::Session(AuthSession::Checking),
            Action::Status(StatusLine::Verifying { attempt: 1, max: 3 }),
            Action::Schedule(2 * SEC),
        ]
    );
    assert_eq!(
        detector.timer_fired(),
        vec![
            Action::Status(StatusLine::Verifying { attempt: 1, max: 3 }),
            Action::FetchStatus { timeout: REQUEST_TIMEOUT },
        ]
    );
}

#[test]
fn two_failures_then_success_resolves_once_to_dashboard() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let trace = mount(&mut detector, true, vec![offline(), rejected("no session"), ok_user("u1")]);

    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Success));
    assert_eq!(trace.fetches, 3);
    assert_eq!(trace.waits, vec![2 * SEC, SEC, SEC]);
    assert_eq!(trace.navigations, vec![Handoff::after(Destination::Dashboard, SEC)]);
    assert_eq!(trace.flag_clears, 1);
    assert_eq!(trace.teardowns, 1);
    assert!(trace.statuses.contains(&StatusLine::Retrying { attempt: 2, max: 3 }));
    assert!(trace.statuses.contains(&StatusLine::Retrying { attempt: 3, max: 3 }));
    assert_eq!(trace.statuses.last(), Some(&StatusLine::Succeeded));
    assert_eq!(trace.sessions.last().and_then(AuthSession::user).map(|u| u.id.as_str()), Some("u1"));
}

#[test]
fn three_failures_resolve_once_to_login() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let trace = mount(&mut detector, true, vec![offline(), offline(), Err(AuthError::Http(500))]);

    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Failure));
    assert_eq!(trace.fetches, 3);
    assert_eq!(trace.navigations, vec![Handoff::after(Destination::Login, 5 * SEC)]);
    assert!(trace.navigations.iter().all(|h| h.to != Destination::Dashboard));
    assert_eq!(trace.sessions.last(), Some(&AuthSession::Unauthenticated));
    assert_eq!(trace.flag_clears, 1);
    let last = trace.statuses.last().map(ToString::to_string);
    assert_eq!(last.as_deref(), Some("Authentication verification failed. Please try again."));
}

#[test]
fn persistent_rejection_stops_after_budget() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let replies = vec![rejected("no session"), rejected("no session"), rejected("no session"), rejected("no session")];
    let trace = mount(&mut detector, false, replies);

    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Failure));
    assert_eq!(trace.fetches, 3);
    assert!(detector.timer_fired().is_empty());
    assert!(detector.on_status(rejected("no session")).is_empty());
}

#[test]
fn failure_without_tracked_attempt_leaves_flag_alone() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let trace = mount(&mut detector, false, vec![offline(), offline(), offline()]);
    assert_eq!(trace.flag_clears, 0);
}

#[test]
fn rejection_not_retried_when_disabled() {
    let config = DetectorConfig { retry_on_rejection: false, ..DetectorConfig::auth_success_page() };
    let mut detector = CompletionDetector::new(config);
    let trace = mount(&mut detector, true, vec![rejected("no session"), ok_user("u1")]);
    assert_eq!(trace.fetches, 1);
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Failure));
}

#[test]
fn transport_errors_still_retried_when_rejections_are_not() {
    let config = DetectorConfig { retry_on_rejection: false, ..DetectorConfig::auth_success_page() };
    let mut detector = CompletionDetector::new(config);
    let trace = mount(&mut detector, true, vec![offline(), ok_user("u1")]);
    assert_eq!(trace.fetches, 2);
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Success));
}

#[test]
fn missing_user_under_reject_policy_fails_immediately() {
    let config = DetectorConfig::auth_success_page().with_placeholder(PlaceholderPolicy::Reject);
    let mut detector = CompletionDetector::new(config);
    let bare = Ok(AuthStatusResponse { success: true, ..AuthStatusResponse::default() });
    let trace = mount(&mut detector, true, vec![bare]);
    assert_eq!(trace.fetches, 1);
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Failure));
}

#[test]
fn success_without_user_authenticates_placeholder() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    let bare = Ok(AuthStatusResponse { success: true, authenticated: false, ..AuthStatusResponse::default() });
    let trace = mount(&mut detector, true, vec![bare]);
    let user = trace.sessions.last().and_then(AuthSession::user).cloned();
    assert!(user.is_some_and(|u| u.is_placeholder()));
}

#[test]
fn callback_page_without_attempt_goes_home() {
    let mut detector = CompletionDetector::new(DetectorConfig::oauth_callback_page());
    let trace = mount(&mut detector, false, vec![ok_user("u1")]);
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::NoAttempt));
    assert_eq!(trace.fetches, 0);
    assert_eq!(trace.navigations, vec![Handoff::now(Destination::Home)]);
}

#[test]
fn callback_page_single_check_after_two_seconds() {
    let mut detector = CompletionDetector::new(DetectorConfig::oauth_callback_page());
    let trace = mount(&mut detector, true, vec![offline(), ok_user("u1")]);
    assert_eq!(trace.waits, vec![2 * SEC]);
    assert_eq!(trace.fetches, 1);
    assert_eq!(trace.navigations, vec![Handoff::after(Destination::Login, 2 * SEC)]);
}

#[test]
fn stale_attempt_does_not_start_polling() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let actions = detector.trigger(Trigger::Mount, false);
    assert!(!matches!(
        detector.state(),
        DetectorState::Polling { cycle: Cycle::Completion { .. }, .. }
    ));
    assert_eq!(actions, vec![Action::Session(AuthSession::Checking), Action::FetchStatus { timeout: REQUEST_TIMEOUT }]);
}

#[test]
fn monitor_probe_updates_session_only() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let trace = mount(&mut detector, false, vec![ok_user("u9")]);
    assert_eq!(detector.state(), DetectorState::Idle);
    assert!(trace.navigations.is_empty());
    assert!(trace.statuses.is_empty());
    assert!(trace.sessions.last().is_some_and(AuthSession::is_authenticated));
}

#[test]
fn monitor_probe_failure_is_quiet() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let trace = mount(&mut detector, false, vec![Err(AuthError::Http(401))]);
    assert_eq!(detector.state(), DetectorState::Idle);
    assert_eq!(trace.fetches, 1);
    assert_eq!(trace.flag_clears, 0);
    assert_eq!(trace.sessions.last(), Some(&AuthSession::Unauthenticated));
}

#[test]
fn monitor_with_active_attempt_checks_immediately() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let trace = mount(&mut detector, true, vec![rejected("pending"), ok_user("u1")]);
    assert_eq!(trace.waits, vec![MONITOR_INTERVAL]);
    assert_eq!(trace.navigations, vec![Handoff::now(Destination::Dashboard)]);
}

#[test]
fn focus_trigger_is_debounced() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let actions = detector.trigger(Trigger::FocusRegained, true);
    assert_eq!(actions.last(), Some(&Action::Schedule(TRIGGER_DEBOUNCE)));
}

#[test]
fn focus_without_attempt_does_nothing() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    assert!(detector.trigger(Trigger::VisibilityRegained, false).is_empty());
    assert_eq!(detector.state(), DetectorState::Idle);
}

#[test]
fn triggers_during_polling_are_coalesced() {
    let mut detector = CompletionDetector::new(DetectorConfig::monitor());
    let first = detector.trigger(Trigger::Mount, true);
    assert!(!first.is_empty());
    assert!(detector.trigger(Trigger::FocusRegained, true).is_empty());
    assert!(detector.trigger(Trigger::VisibilityRegained, true).is_empty());
    assert!(detector.timer_fired().is_empty());
}

#[test]
fn resolved_detector_ignores_everything() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    mount(&mut detector, true, vec![ok_user("u1")]);
    assert!(detector.is_resolved());
    assert!(detector.trigger(Trigger::Mount, true).is_empty());
    assert!(detector.trigger(Trigger::FocusRegained, true).is_empty());
    assert!(detector.timer_fired().is_empty());
    assert!(detector.on_status(ok_user("u2")).is_empty());
    assert!(!detector.reset());
}

#[test]
fn manual_retry_after_failure_starts_new_cycle() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    mount(&mut detector, false, vec![offline(), offline(), offline()]);
    assert!(detector.reset());
    assert_eq!(detector.state(), DetectorState::Idle);
    let initial = detector.trigger(Trigger::ManualRetry, false);
    let trace = run(&mut detector, initial, &mut VecDeque::from(vec![ok_user("u1")]));
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Success));
    assert_eq!(trace.navigations.len(), 1);
}

#[test]
fn reset_starts_a_new_epoch() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    assert_eq!(detector.epoch(), 0);
    mount(&mut detector, false, vec![offline(), offline(), offline()]);
    assert_eq!(detector.epoch(), 0);
    assert!(detector.reset());
    assert_eq!(detector.epoch(), 1);
    assert!(!detector.reset());
    assert_eq!(detector.epoch(), 1);
}

#[test]
fn retry_restarts_verification_when_gate_is_open() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    mount(&mut detector, false, vec![offline(), offline(), offline()]);
    let actions = detector.retry(false);
    assert!(actions.contains(&Action::Schedule(2 * SEC)));
    assert!(matches!(detector.state(), DetectorState::Polling { attempt: 1, .. }));
}

#[test]
fn retry_without_attempt_flag_goes_to_login() {
    let mut detector = CompletionDetector::new(DetectorConfig::oauth_callback_page());
    mount(&mut detector, true, vec![rejected("no session")]);
    assert_eq!(detector.state(), DetectorState::Resolved(Resolution::Failure));
    let actions = detector.retry(false);
    assert_eq!(actions, vec![Action::Navigate(Handoff::now(Destination::Login))]);
    assert_eq!(detector.state(), DetectorState::Idle);
}

#[test]
fn retry_outside_failure_does_nothing() {
    let mut detector = CompletionDetector::new(DetectorConfig::auth_success_page());
    assert!(detector.retry(true).is_empty());
    mount(&mut detector, false, vec![ok_user("u1")]);
    assert!(detector.retry(true).is_empty());
    assert_eq!(detector.epoch(), 0);
}

#[test]
fn status_lines_render_user_texts() {
    assert_eq!(
        StatusLine::Verifying { attempt: 1, max: 3 }.to_string(),
        "Verifying authentication... (1/3)"
    );
    assert_eq!(
        StatusLine::Retrying { attempt: 2, max: 3 }.to_string(),
        "Authentication check failed. Retrying... (2/3)"
    );
    assert_eq!(StatusLine::Succeeded.to_string(), "Authentication successful! Redirecting to dashboard...");
    assert!(StatusLine::Failed { reason: "x".into() }.is_failure());
}
