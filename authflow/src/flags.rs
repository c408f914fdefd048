//! Persisted "OAuth login in progress" marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! Starting an OAuth login navigates the whole page away to the provider, so
//! the fact that a login was started has to survive the round trip. It lives
//! under two string keys in a [`KeyValueStore`] (browser `localStorage` in
//! production). Every read of the flag goes through [`FlagStore::is_active`],
//! which owns the TTL policy and drops abandoned attempts.
//!
//! TRADE-OFFS
//! ==========
//! There is no cross-tab coordination. Two tabs starting logins overwrite each
//! other and whichever completes first clears the flag for both.

#[cfg(test)]
#[path = "flags_test.rs"]
mod flags_test;

#[cfg(any(test, feature = "test-support"))]
use std::cell::{Cell, RefCell};
#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Key holding `"true"` while an OAuth login is in progress.
pub const LOGIN_FLAG_KEY: &str = "vivaran-oauth-login";
/// Key holding the attempt start time in epoch milliseconds.
pub const LOGIN_TIMESTAMP_KEY: &str = "vivaran-login-timestamp";
/// Age after which an attempt is considered abandoned.
pub const ATTEMPT_TTL: Duration = Duration::from_secs(10 * 60);

/// String key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Wall clock in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

impl<T: Clock + ?Sized> Clock for Rc<T> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// In-memory store for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Clock that only moves when told to.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

#[cfg(any(test, feature = "test-support"))]
impl ManualClock {
    #[must_use]
    pub fn at(now_ms: u64) -> Self {
        Self { now_ms: Cell::new(now_ms) }
    }

    pub fn advance(&self, by: Duration) {
        let step = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms.set(self.now_ms.get().saturating_add(step));
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// A login attempt as read back from storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthAttempt {
    pub in_progress: bool,
    /// Epoch milliseconds; `0` when the stored timestamp was unreadable.
    pub started_at_ms: u64,
}

impl AuthAttempt {
    #[must_use]
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.started_at_ms))
    }

    /// A start time more than `ttl` in the future cannot come from this
    /// clock and counts as malformed.
    #[must_use]
    pub fn is_live(&self, now_ms: u64, ttl: Duration) -> bool {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self.in_progress
            && self.started_at_ms > 0
            && self.started_at_ms <= now_ms.saturating_add(ttl_ms)
            && self.age(now_ms) < ttl
    }
}

/// TTL-enforcing view over the two login keys.
#[derive(Debug)]
pub struct FlagStore<S, C> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> FlagStore<S, C> {
    #[must_use]
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Record a fresh attempt, replacing any previous one.
    pub fn begin(&self) -> AuthAttempt {
        let now = self.clock.now_ms();
        self.store.set(LOGIN_FLAG_KEY, "true");
        self.store.set(LOGIN_TIMESTAMP_KEY, &now.to_string());
        log::info!("oauth attempt recorded at {now}");
        AuthAttempt { in_progress: true, started_at_ms: now }
    }

    /// Raw read of the stored attempt. Never mutates storage.
    #[must_use]
    pub fn attempt(&self) -> Option<AuthAttempt> {
        let flag = self.store.get(LOGIN_FLAG_KEY);
        let stamp = self.store.get(LOGIN_TIMESTAMP_KEY);
        if flag.is_none() && stamp.is_none() {
            return None;
        }
        let started_at_ms = match stamp.as_deref().map(|raw| raw.trim().parse::<u64>()) {
            Some(Ok(ms)) => ms,
            _ => 0,
        };
        Some(AuthAttempt { in_progress: flag.as_deref() == Some("true"), started_at_ms })
    }

    /// `true` while a recorded attempt is younger than the TTL.
    ///
    /// Expired, malformed or half-written attempts are removed as a side
    /// effect, so repeated calls converge on the same answer.
    pub fn is_active(&self) -> bool {
        let Some(attempt) = self.attempt() else {
            return false;
        };
        if attempt.is_live(self.clock.now_ms(), ATTEMPT_TTL) {
            return true;
        }
        log::info!(
            "dropping stale oauth attempt (age {}s)",
            attempt.age(self.clock.now_ms()).as_secs()
        );
        self.clear();
        false
    }

    /// Remove both keys.
    pub fn clear(&self) {
        self.store.remove(LOGIN_FLAG_KEY);
        self.store.remove(LOGIN_TIMESTAMP_KEY);
    }
}
