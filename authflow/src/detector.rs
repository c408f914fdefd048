//! OAuth completion detection as a sans-IO state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! After the provider redirects back, the session cookie may take a moment to
//! become visible to the status endpoint. The detector decides when to ask,
//! how often to retry and what to do once it knows. It performs no IO: every
//! input (trigger, timer tick, status reply) returns a list of [`Action`]s that
//! the host executes in order. [`crate::driver::drive`] is the async host loop.
//!
//! ```text
//!            trigger (gate open)                 success
//!   Idle ─────────────────────────▶ Polling ───────────────▶ Resolved(Success)
//!    ▲  ╲ Mount, gate closed,         │  failure, budget left ─┐
//!    │   ╲ probe_on_mount             │◀───────────────────────┘
//!    │    ▼                           │  failure, budget spent
//!    └── Polling(probe) ──reply──┘    └──────────────────────▶ Resolved(Failure)
//!
//!   Idle ── Mount, gate closed, on_no_attempt set ──▶ Resolved(NoAttempt)
//! ```
//!
//! DESIGN
//! ======
//! All trigger sources funnel through [`CompletionDetector::trigger`], which
//! ignores anything arriving while a cycle is running. Once resolved, every
//! input is a no-op until [`CompletionDetector::reset`].

#[cfg(test)]
#[path = "detector_test.rs"]
mod detector_test;

use std::fmt;
use std::time::Duration;

use crate::error::AuthError;
use crate::redirect::Destination;
use crate::retry::RetryPolicy;
use crate::session::AuthSession;
use crate::status::{AuthStatusResponse, PlaceholderPolicy, interpret};

/// Upper bound on a single status request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
/// Settling time after focus or visibility returns.
pub const TRIGGER_DEBOUNCE: Duration = Duration::from_secs(1);
/// Cadence of the app-wide monitor.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(3);
/// Monitor checks per cycle; 20 × 3 s covers a slow provider round trip.
pub const MONITOR_MAX_CHECKS: u32 = 20;

/// Events that may start a verification cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    VisibilityRegained,
    FocusRegained,
    ManualRetry,
}

impl Trigger {
    fn is_debounced(self) -> bool {
        matches!(self, Self::VisibilityRegained | Self::FocusRegained)
    }
}

/// Condition for starting a verification cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Only while the flag store reports an active attempt.
    RequireFlag,
    /// Unconditionally (the page itself implies a login just happened).
    Always,
}

/// A navigation scheduled by the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handoff {
    pub to: Destination,
    pub after: Duration,
}

impl Handoff {
    #[must_use]
    pub const fn now(to: Destination) -> Self {
        Self { to, after: Duration::ZERO }
    }

    #[must_use]
    pub const fn after(to: Destination, after: Duration) -> Self {
        Self { to, after }
    }
}

/// Tunables for one detector instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectorConfig {
    pub gate: Gate,
    pub retry: RetryPolicy,
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub placeholder: PlaceholderPolicy,
    /// Retry an explicit `success: false`, not just transport failures.
    pub retry_on_rejection: bool,
    /// On a gated-out `Mount`, still run one quiet session check.
    pub probe_on_mount: bool,
    pub on_success: Option<Handoff>,
    pub on_failure: Option<Handoff>,
    pub on_no_attempt: Option<Handoff>,
}

impl DetectorConfig {
    /// App-wide monitor: checks every 3 s while an attempt is active and
    /// probes the session once on load otherwise.
    #[must_use]
    pub fn monitor() -> Self {
        Self {
            gate: Gate::RequireFlag,
            retry: RetryPolicy::interval(MONITOR_INTERVAL, MONITOR_MAX_CHECKS),
            debounce: TRIGGER_DEBOUNCE,
            request_timeout: REQUEST_TIMEOUT,
            placeholder: PlaceholderPolicy::default(),
            retry_on_rejection: true,
            probe_on_mount: true,
            on_success: Some(Handoff::now(Destination::Dashboard)),
            on_failure: None,
            on_no_attempt: None,
        }
    }

    /// `/auth-success`: three checks, 2 s before the first and 1 s between.
    #[must_use]
    pub fn auth_success_page() -> Self {
        Self {
            gate: Gate::Always,
            retry: RetryPolicy::new(3, Duration::from_secs(2), Duration::from_secs(1)),
            debounce: TRIGGER_DEBOUNCE,
            request_timeout: REQUEST_TIMEOUT,
            placeholder: PlaceholderPolicy::default(),
            retry_on_rejection: true,
            probe_on_mount: false,
            on_success: Some(Handoff::after(Destination::Dashboard, Duration::from_secs(1))),
            on_failure: Some(Handoff::after(Destination::Login, Duration::from_secs(5))),
            on_no_attempt: None,
        }
    }

    /// `/oauth-callback`: one check 2 s after landing, only if a login was
    /// started from this browser.
    #[must_use]
    pub fn oauth_callback_page() -> Self {
        Self {
            gate: Gate::RequireFlag,
            retry: RetryPolicy::once(Duration::from_secs(2)),
            debounce: TRIGGER_DEBOUNCE,
            request_timeout: REQUEST_TIMEOUT,
            placeholder: PlaceholderPolicy::default(),
            retry_on_rejection: false,
            probe_on_mount: false,
            on_success: Some(Handoff::after(Destination::Dashboard, Duration::from_secs(1))),
            on_failure: Some(Handoff::after(Destination::Login, Duration::from_secs(2))),
            on_no_attempt: Some(Handoff::now(Destination::Home)),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: PlaceholderPolicy) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Outcome of a finished cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Success,
    Failure,
    NoAttempt,
}

/// What a running cycle is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// Waiting for an OAuth login to land. `tracking` records whether a
    /// flag-store attempt was active when the cycle began.
    Completion { tracking: bool },
    /// Single quiet session check.
    Probe,
}

/// Which input a polling cycle is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Awaiting {
    Timer,
    Reply,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    Polling { cycle: Cycle, attempt: u32, awaiting: Awaiting },
    Resolved(Resolution),
}

/// User-facing progress line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLine {
    Verifying { attempt: u32, max: u32 },
    Retrying { attempt: u32, max: u32 },
    Succeeded,
    /// `reason` is diagnostic detail, not shown in the headline.
    Failed { reason: String },
    NoAttempt,
}

impl StatusLine {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verifying { attempt, max } => write!(f, "Verifying authentication... ({attempt}/{max})"),
            Self::Retrying { attempt, max } => {
                write!(f, "Authentication check failed. Retrying... ({attempt}/{max})")
            }
            Self::Succeeded => f.write_str("Authentication successful! Redirecting to dashboard..."),
            Self::Failed { .. } => f.write_str("Authentication verification failed. Please try again."),
            Self::NoAttempt => f.write_str("No login in progress. Redirecting..."),
        }
    }
}

/// Instructions for the host, executed in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Wait, then call [`CompletionDetector::timer_fired`].
    Schedule(Duration),
    /// Fetch the auth status (bounded by `timeout`), then call
    /// [`CompletionDetector::on_status`].
    FetchStatus { timeout: Duration },
    Status(StatusLine),
    Session(AuthSession),
    /// Remove the flag-store attempt.
    ClearFlag,
    /// Drop listeners and timers owned by this detector.
    Teardown,
    Navigate(Handoff),
}

/// The completion state machine. See the module docs.
#[derive(Clone, Debug)]
pub struct CompletionDetector {
    config: DetectorConfig,
    state: DetectorState,
    /// Bumped by [`reset`](Self::reset). Actions queued before a reset belong
    /// to an abandoned cycle and the driver drops them.
    epoch: u64,
}

impl CompletionDetector {
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self { config, state: DetectorState::Idle, epoch: 0 }
    }

    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> DetectorState {
        self.state
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, DetectorState::Resolved(_))
    }

    /// Single entry point for every trigger source.
    ///
    /// `attempt_active` is the flag store's [`is_active`] answer, read by the
    /// host right before calling.
    ///
    /// [`is_active`]: crate::flags::FlagStore::is_active
    #[must_use]
    pub fn trigger(&mut self, trigger: Trigger, attempt_active: bool) -> Vec<Action> {
        if self.state != DetectorState::Idle {
            log::debug!("ignoring {trigger:?} while {:?}", self.state);
            return Vec::new();
        }
        let gate_open = match self.config.gate {
            Gate::Always => true,
            Gate::RequireFlag => attempt_active,
        };
        if gate_open {
            let delay = if trigger.is_debounced() {
                self.config.debounce.max(self.config.retry.initial_delay)
            } else {
                self.config.retry.initial_delay
            };
            log::info!("starting auth verification on {trigger:?}");
            return self.start(Cycle::Completion { tracking: attempt_active }, delay);
        }
        if trigger != Trigger::Mount {
            return Vec::new();
        }
        if self.config.probe_on_mount {
            return self.start(Cycle::Probe, Duration::ZERO);
        }
        match self.config.on_no_attempt {
            Some(handoff) => {
                log::info!("no oauth attempt in progress");
                self.state = DetectorState::Resolved(Resolution::NoAttempt);
                vec![Action::Status(StatusLine::NoAttempt), Action::Teardown, Action::Navigate(handoff)]
            }
            None => Vec::new(),
        }
    }

    /// The wait requested by the last [`Action::Schedule`] has elapsed.
    #[must_use]
    pub fn timer_fired(&mut self) -> Vec<Action> {
        match self.state {
            DetectorState::Polling { cycle, attempt, awaiting: Awaiting::Timer } => self.fetch(cycle, attempt),
            _ => Vec::new(),
        }
    }

    /// The status request issued by the last [`Action::FetchStatus`] finished.
    #[must_use]
    pub fn on_status(&mut self, reply: Result<AuthStatusResponse, AuthError>) -> Vec<Action> {
        let DetectorState::Polling { cycle, attempt, awaiting: Awaiting::Reply } = self.state else {
            log::debug!("dropping late status reply while {:?}", self.state);
            return Vec::new();
        };
        let placeholder = self.config.placeholder;
        let outcome = reply.and_then(|response| interpret(response, placeholder));
        match (cycle, outcome) {
            (Cycle::Probe, Ok(user)) => {
                self.state = DetectorState::Idle;
                vec![Action::Session(AuthSession::Authenticated(user)), Action::ClearFlag]
            }
            (Cycle::Probe, Err(err)) => {
                log::debug!("session probe: {err}");
                self.state = DetectorState::Idle;
                vec![Action::Session(AuthSession::Unauthenticated)]
            }
            (Cycle::Completion { .. }, Ok(user)) => {
                log::info!("oauth login confirmed on check {attempt}");
                self.state = DetectorState::Resolved(Resolution::Success);
                let mut actions = vec![
                    Action::Session(AuthSession::Authenticated(user)),
                    Action::ClearFlag,
                    Action::Status(StatusLine::Succeeded),
                    Action::Teardown,
                ];
                actions.extend(self.config.on_success.map(Action::Navigate));
                actions
            }
            (Cycle::Completion { tracking }, Err(err)) => self.failed(tracking, attempt, err),
        }
    }

    /// Leave a failed resolution so a manual retry can start a new cycle.
    ///
    /// Returns `false` (and does nothing) in any other state.
    pub fn reset(&mut self) -> bool {
        if self.state == DetectorState::Resolved(Resolution::Failure) {
            self.state = DetectorState::Idle;
            self.epoch += 1;
            return true;
        }
        false
    }

    /// The "Retry" button: reset and start a fresh cycle.
    ///
    /// When the gate stays closed (the attempt flag was cleared by the failed
    /// cycle) the user is sent to the login page instead. Outside a failed
    /// resolution nothing happens.
    #[must_use]
    pub fn retry(&mut self, attempt_active: bool) -> Vec<Action> {
        if !self.reset() {
            log::debug!("ignoring retry while {:?}", self.state);
            return Vec::new();
        }
        let actions = self.trigger(Trigger::ManualRetry, attempt_active);
        if actions.is_empty() {
            log::info!("retry has no login attempt to verify, back to login");
            return vec![Action::Navigate(Handoff::now(Destination::Login))];
        }
        actions
    }

    fn start(&mut self, cycle: Cycle, delay: Duration) -> Vec<Action> {
        let mut actions = vec![Action::Session(AuthSession::Checking)];
        if delay.is_zero() {
            actions.extend(self.fetch(cycle, 1));
        } else {
            if matches!(cycle, Cycle::Completion { .. }) {
                actions.push(Action::Status(StatusLine::Verifying { attempt: 1, max: self.config.retry.max_attempts }));
            }
            self.state = DetectorState::Polling { cycle, attempt: 1, awaiting: Awaiting::Timer };
            actions.push(Action::Schedule(delay));
        }
        actions
    }

    fn fetch(&mut self, cycle: Cycle, attempt: u32) -> Vec<Action> {
        self.state = DetectorState::Polling { cycle, attempt, awaiting: Awaiting::Reply };
        let fetch = Action::FetchStatus { timeout: self.config.request_timeout };
        match cycle {
            Cycle::Probe => vec![fetch],
            Cycle::Completion { .. } => vec![
                Action::Status(StatusLine::Verifying { attempt, max: self.config.retry.max_attempts }),
                fetch,
            ],
        }
    }

    fn failed(&mut self, tracking: bool, attempt: u32, err: AuthError) -> Vec<Action> {
        let policy = self.config.retry;
        let worth_retrying = err.retryable() && (self.config.retry_on_rejection || !err.is_rejection());
        if worth_retrying && policy.allows_after(attempt) {
            log::warn!("auth check {attempt}/{} failed, will retry: {err}", policy.max_attempts);
            let next = attempt + 1;
            let cycle = Cycle::Completion { tracking };
            let mut actions = vec![Action::Status(StatusLine::Retrying { attempt: next, max: policy.max_attempts })];
            let delay = policy.delay_before(next);
            if delay.is_zero() {
                actions.extend(self.fetch(cycle, next));
            } else {
                self.state = DetectorState::Polling { cycle, attempt: next, awaiting: Awaiting::Timer };
                actions.push(Action::Schedule(delay));
            }
            return actions;
        }
        log::warn!("auth verification failed after {attempt} check(s): {err}");
        self.state = DetectorState::Resolved(Resolution::Failure);
        let mut actions = vec![Action::Session(AuthSession::Unauthenticated)];
        if tracking {
            actions.push(Action::ClearFlag);
        }
        actions.push(Action::Status(StatusLine::Failed { reason: err.to_string() }));
        actions.push(Action::Teardown);
        actions.extend(self.config.on_failure.map(Action::Navigate));
        actions
    }
}
