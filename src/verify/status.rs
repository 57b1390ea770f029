//! Verification status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent verification of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyState {
    /// The manager's check passed.
    Verified,
    /// The manager's check ran and reported a problem.
    Failed,
    /// The check could not run or produced no usable answer.
    Unknown,
    /// Never checked.
    Unverified,
}

impl VerifyState {
    /// Lowercase label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyState::Verified => "verified",
            VerifyState::Failed => "failed",
            VerifyState::Unknown => "unknown",
            VerifyState::Unverified => "unverified",
        }
    }
}

/// Stored verification result for one package identity.
///
/// Overwritten wholesale on re-verification; never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    /// Pass/fail/unknown outcome.
    pub state: VerifyState,

    /// Error text or audit summary.
    pub message: String,

    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

impl VerificationStatus {
    /// A passing result.
    pub fn verified(message: impl Into<String>) -> Self {
        Self::now(VerifyState::Verified, message)
    }

    /// A failing result.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::now(VerifyState::Failed, message)
    }

    /// A result for a check that could not run.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::now(VerifyState::Unknown, message)
    }

    /// The never-checked placeholder.
    pub fn unverified() -> Self {
        Self::now(VerifyState::Unverified, "Not verified yet")
    }

    fn now(state: VerifyState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
            checked_at: Utc::now(),
        }
    }
}

/// Per-state counts for a `verify --all` batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
    pub unknown: usize,
}

impl BatchSummary {
    /// Tally a batch of statuses.
    pub fn tally<'a>(statuses: impl Iterator<Item = &'a VerificationStatus>) -> Self {
        let mut summary = Self {
            total: 0,
            verified: 0,
            failed: 0,
            unknown: 0,
        };
        for status in statuses {
            summary.total += 1;
            match status.state {
                VerifyState::Verified => summary.verified += 1,
                VerifyState::Failed => summary.failed += 1,
                VerifyState::Unknown | VerifyState::Unverified => summary.unknown += 1,
            }
        }
        summary
    }
}
