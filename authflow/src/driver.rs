//! Async loop that executes detector actions against a host.
//!
//! The host supplies the IO: fetching status, sleeping, updating UI state and
//! navigating. Everything runs on one thread; the detector lives in a
//! `RefCell` so several trigger sources can share it, and it is only borrowed
//! between awaits.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{Either, select};

use crate::detector::{Action, CompletionDetector, DetectorState, Handoff, StatusLine};
use crate::error::AuthError;
use crate::redirect::Destination;
use crate::session::AuthSession;
use crate::status::AuthStatusResponse;

/// IO surface the driver needs.
#[async_trait(?Send)]
pub trait Host {
    async fn fetch_status(&self) -> Result<AuthStatusResponse, AuthError>;
    async fn sleep(&self, delay: Duration);
    fn apply_session(&self, session: AuthSession);
    fn show_status(&self, status: StatusLine);
    fn clear_flag(&self);
    /// Remove listeners and timers tied to the detector.
    fn teardown(&self);
    fn navigate(&self, to: Destination);
}

/// Shared "still mounted" flag, flipped off in `on_cleanup`.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Run `actions` and everything they lead to.
///
/// Stops early once `liveness` is cancelled or the detector is reset (a
/// manual retry started a new cycle). Both are checked after every await, so
/// nothing reaches an unmounted page and a stale failure redirect never
/// overrides the retry. Returns the detector state at exit.
pub async fn drive<H: Host + ?Sized>(
    detector: &RefCell<CompletionDetector>,
    host: &H,
    liveness: &Liveness,
    actions: Vec<Action>,
) -> DetectorState {
    let epoch = detector.borrow().epoch();
    let current = || liveness.is_alive() && detector.borrow().epoch() == epoch;
    let mut queue: VecDeque<Action> = actions.into();
    while let Some(action) = queue.pop_front() {
        if !current() {
            log::debug!("auth driver stopped: page unmounted or cycle superseded");
            break;
        }
        match action {
            Action::Schedule(delay) => {
                host.sleep(delay).await;
                if current() {
                    queue.extend(detector.borrow_mut().timer_fired());
                }
            }
            Action::FetchStatus { timeout } => {
                let reply = fetch_with_timeout(host, timeout).await;
                if current() {
                    queue.extend(detector.borrow_mut().on_status(reply));
                }
            }
            Action::Status(line) => host.show_status(line),
            Action::Session(session) => host.apply_session(session),
            Action::ClearFlag => host.clear_flag(),
            Action::Teardown => host.teardown(),
            Action::Navigate(Handoff { to, after }) => {
                if !after.is_zero() {
                    host.sleep(after).await;
                }
                if current() {
                    host.navigate(to);
                }
            }
        }
    }
    detector.borrow().state()
}

/// Race the status fetch against `timeout`. A zero timeout disables the race.
async fn fetch_with_timeout<H: Host + ?Sized>(
    host: &H,
    timeout: Duration,
) -> Result<AuthStatusResponse, AuthError> {
    if timeout.is_zero() {
        return host.fetch_status().await;
    }
    match select(host.fetch_status(), host.sleep(timeout)).await {
        Either::Left((reply, _)) => reply,
        Either::Right(((), _)) => {
            log::warn!("auth status request timed out after {}ms", timeout.as_millis());
            Err(AuthError::Timeout(timeout))
        }
    }
}
