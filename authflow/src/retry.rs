//! Bounded retry schedules.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::time::Duration;

/// How many checks a verification cycle may run and how long to wait first.
///
/// Attempts are numbered from 1. The wait before attempt 1 is
/// `initial_delay`; every later attempt waits `retry_delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// A zero `max_attempts` is raised to one.
    #[must_use]
    pub const fn new(max_attempts: u32, initial_delay: Duration, retry_delay: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self { max_attempts, initial_delay, retry_delay }
    }

    /// One check after `delay`, no retries.
    #[must_use]
    pub const fn once(delay: Duration) -> Self {
        Self::new(1, delay, Duration::ZERO)
    }

    /// Check immediately, then every `every` up to `max_attempts` times.
    #[must_use]
    pub const fn interval(every: Duration, max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, every)
    }

    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 { self.initial_delay } else { self.retry_delay }
    }

    /// `true` if another attempt may follow `attempt`.
    #[must_use]
    pub fn allows_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
