//! Failures of the auth status boundary.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

/// Failure of a single auth exchange with the backend.
///
/// An error ends that exchange only. Whether the surrounding verification
/// cycle tries again is decided by [`AuthError::retryable`] together with the
/// detector's retry policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Http(u16),
    /// No response at all: offline, DNS, CORS or an aborted request.
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The body could not be decoded into the expected shape.
    #[error("unexpected response: {0}")]
    Malformed(String),
    /// `success: true` without a user while placeholder users are disabled.
    #[error("session is valid but no user profile was returned")]
    MissingUser,
    /// No reply within the per-request budget.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// A browser-only call was made outside the browser.
    #[error("not available on server")]
    Unavailable,
}

impl AuthError {
    /// Returns `true` if repeating the same request may succeed.
    ///
    /// Cookies set by the OAuth redirect can lag the first status check, so
    /// HTTP and application-level rejections count as transient here.
    #[must_use]
    pub fn retryable(&self) -> bool {
        !matches!(self, Self::MissingUser | Self::Unavailable)
    }

    /// Returns `true` for an explicit `success: false` from the backend.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
