//! Conflict finding types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collector::PackageIdentity;

/// Severity of a conflict finding.
///
/// A static property of the rule that fired, not derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// One conflict reported by a rule.
///
/// Findings are recomputed fully on every scan and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFinding {
    /// Id of the rule that fired.
    pub rule: String,

    /// Severity of the rule that fired.
    pub severity: Severity,

    /// What was found.
    pub description: String,

    /// What the user might do about it.
    pub suggestion: String,

    /// Identities involved, sorted.
    pub packages: Vec<PackageIdentity>,
}
