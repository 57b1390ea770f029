//! Boundary documents for the presentation layer.
//!
//! Every CLI operation can emit one of these JSON documents with `--json`;
//! they are the surface an external dashboard consumes.

use serde::{Deserialize, Serialize};

use crate::collector::{Advisory, AggregateStats, PackageRecord};
use crate::conflicts::ConflictFinding;
use crate::managers::Manager;
use crate::state::HistoryEntry;
use crate::verify::{BatchSummary, VerificationStatus};

/// Response for `collect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectResponse {
    pub packages: Vec<PackageRecord>,
    pub stats: AggregateStats,
    pub advisories: Vec<Advisory>,
    /// Removals detected by this pass's snapshot diff.
    pub removals: Vec<HistoryEntry>,
}

/// Response for `verify` on a single identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub manager: Manager,
    pub name: String,
    #[serde(flatten)]
    pub status: VerificationStatus,
}

/// Response for `verify --all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAllResponse {
    pub summary: BatchSummary,
    pub statuses: Vec<VerifyResponse>,
}

/// Response for `conflicts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictsResponse {
    pub findings: Vec<ConflictFinding>,
}

/// Response for `history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Most recent first.
    pub entries: Vec<HistoryEntry>,
}

/// Response for `uninstall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UninstallResponse {
    pub success: bool,
    pub message: String,
}
