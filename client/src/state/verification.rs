//! Progress shown while a login is being verified.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/auth-success` and `/oauth-callback` render this state. The auth host
//! feeds it every [`StatusLine`] the detector emits; the panel reads the phase
//! to decide which actions to offer.

#[cfg(test)]
#[path = "verification_test.rs"]
mod verification_test;

use authflow::detector::StatusLine;

/// Number of failed verification rounds after which troubleshooting help shows.
pub const HELP_AFTER_FAILURES: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerificationPhase {
    #[default]
    Working,
    Succeeded,
    Failed,
    NoAttempt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationState {
    pub message: String,
    pub phase: VerificationPhase,
    /// Rounds that ended in failure since the page mounted.
    pub failed_rounds: u32,
}

impl Default for VerificationState {
    fn default() -> Self {
        Self {
            message: "Verifying authentication...".to_owned(),
            phase: VerificationPhase::Working,
            failed_rounds: 0,
        }
    }
}

impl VerificationState {
    pub fn apply(&mut self, line: &StatusLine) {
        self.message = line.to_string();
        self.phase = match line {
            StatusLine::Verifying { .. } | StatusLine::Retrying { .. } => VerificationPhase::Working,
            StatusLine::Succeeded => VerificationPhase::Succeeded,
            StatusLine::Failed { .. } => {
                self.failed_rounds += 1;
                VerificationPhase::Failed
            }
            StatusLine::NoAttempt => VerificationPhase::NoAttempt,
        };
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.phase == VerificationPhase::Failed
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.failed_rounds > HELP_AFTER_FAILURES
    }
}
