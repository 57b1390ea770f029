//! Pending-removal markers.
//!
//! The uninstall operation writes a marker before invoking the manager's
//! uninstall command; the next snapshot diff consumes matching markers to
//! classify the disappearance as dashboard-initiated. Without this two-step
//! protocol the tracker could not tell user-driven removal apart from
//! external removal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collector::PackageIdentity;
use crate::error::Result;
use crate::state::layout::StateDir;

/// One marker for an uninstall that has been requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRemoval {
    pub identity: PackageIdentity,
    pub marked_at: DateTime<Utc>,
}

/// The persisted set of pending-removal markers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingRemovals {
    markers: Vec<PendingRemoval>,
}

impl PendingRemovals {
    /// Load from the state directory (missing/corrupt file → empty).
    pub fn load(state: &StateDir) -> Self {
        state.load_or_default(&state.pending_file())
    }

    /// Persist the current marker set.
    pub fn save(&self, state: &StateDir) -> Result<()> {
        state.save_json(&state.pending_file(), self)
    }

    /// Mark an identity as about to be uninstalled. Idempotent.
    pub fn mark(&mut self, identity: PackageIdentity) {
        if !self.is_marked(&identity) {
            self.markers.push(PendingRemoval {
                identity,
                marked_at: Utc::now(),
            });
        }
    }

    /// Whether a marker exists for this identity.
    pub fn is_marked(&self, identity: &PackageIdentity) -> bool {
        self.markers.iter().any(|m| &m.identity == identity)
    }

    /// Remove the marker for an identity, returning whether one existed.
    ///
    /// Used both by the snapshot diff (classification) and by a failed
    /// uninstall (rollback).
    pub fn consume(&mut self, identity: &PackageIdentity) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| &m.identity != identity);
        self.markers.len() != before
    }

    /// Number of outstanding markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether there are no outstanding markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
