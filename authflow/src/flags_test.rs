use super::*;

const MINUTE: Duration = Duration::from_secs(60);
const T0: u64 = 1_700_000_000_000;

fn fixture() -> (Rc<MemoryStore>, Rc<ManualClock>, FlagStore<Rc<MemoryStore>, Rc<ManualClock>>) {
    let store = Rc::new(MemoryStore::new());
    let clock = Rc::new(ManualClock::at(T0));
    let flags = FlagStore::new(Rc::clone(&store), Rc::clone(&clock));
    (store, clock, flags)
}

#[test]
fn begin_writes_both_keys() {
    let (store, _clock, flags) = fixture();
    let attempt = flags.begin();
    assert_eq!(attempt, AuthAttempt { in_progress: true, started_at_ms: T0 });
    assert_eq!(store.get(LOGIN_FLAG_KEY).as_deref(), Some("true"));
    assert_eq!(store.get(LOGIN_TIMESTAMP_KEY), Some(T0.to_string()));
}

#[test]
fn fresh_attempt_is_active() {
    let (_store, clock, flags) = fixture();
    flags.begin();
    clock.advance(9 * MINUTE);
    assert!(flags.is_active());
}

#[test]
fn attempt_older_than_ttl_is_inactive_and_removed() {
    let (store, clock, flags) = fixture();
    flags.begin();
    clock.advance(11 * MINUTE);
    assert!(!flags.is_active());
    assert!(store.is_empty());
    assert_eq!(flags.attempt(), None);
    // idempotent
    assert!(!flags.is_active());
}

#[test]
fn attempt_exactly_at_ttl_is_expired() {
    let (_store, clock, flags) = fixture();
    flags.begin();
    clock.advance(ATTEMPT_TTL);
    assert!(!flags.is_active());
}

#[test]
fn begin_overwrites_previous_attempt() {
    let (_store, clock, flags) = fixture();
    flags.begin();
    clock.advance(8 * MINUTE);
    flags.begin();
    clock.advance(5 * MINUTE);
    assert!(flags.is_active());
    assert_eq!(flags.attempt().map(|a| a.started_at_ms), Some(T0 + 8 * 60_000));
}

#[test]
fn malformed_timestamp_is_treated_as_abandoned() {
    let (store, _clock, flags) = fixture();
    store.set(LOGIN_FLAG_KEY, "true");
    store.set(LOGIN_TIMESTAMP_KEY, "yesterday");
    assert_eq!(flags.attempt(), Some(AuthAttempt { in_progress: true, started_at_ms: 0 }));
    assert!(!flags.is_active());
    assert!(store.is_empty());
}

#[test]
fn orphaned_timestamp_is_cleaned_up() {
    let (store, _clock, flags) = fixture();
    store.set(LOGIN_TIMESTAMP_KEY, &T0.to_string());
    assert!(!flags.is_active());
    assert!(store.is_empty());
}

#[test]
fn missing_keys_read_as_no_attempt() {
    let (_store, _clock, flags) = fixture();
    assert_eq!(flags.attempt(), None);
    assert!(!flags.is_active());
}

#[test]
fn clear_removes_unconditionally() {
    let (store, _clock, flags) = fixture();
    flags.begin();
    store.set("vivaran-language", "hi");
    flags.clear();
    assert_eq!(flags.attempt(), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn timestamp_far_in_the_future_is_dropped() {
    let (store, _clock, flags) = fixture();
    store.set(LOGIN_FLAG_KEY, "true");
    store.set(LOGIN_TIMESTAMP_KEY, &(T0 + 11 * 60_000).to_string());
    assert!(!flags.is_active());
    assert!(store.is_empty());
}

#[test]
fn slight_clock_skew_is_tolerated() {
    let (store, _clock, flags) = fixture();
    store.set(LOGIN_FLAG_KEY, "true");
    store.set(LOGIN_TIMESTAMP_KEY, &(T0 + 30_000).to_string());
    assert!(flags.is_active());
}

#[test]
fn liveness_respects_the_given_ttl() {
    let attempt = AuthAttempt { in_progress: true, started_at_ms: T0 };
    assert!(attempt.is_live(T0 + 30_000, MINUTE));
    assert!(!attempt.is_live(T0 + 2 * 60_000, MINUTE));
    assert!(!attempt.is_live(T0 - 2 * 60_000, MINUTE));
    assert!(attempt.is_live(T0 - 30_000, MINUTE));
}
