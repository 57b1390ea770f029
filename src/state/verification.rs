//! Persisted verification status map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::collector::PackageIdentity;
use crate::error::Result;
use crate::state::layout::StateDir;
use crate::verify::VerificationStatus;

/// Identity-keyed map of latest verification results.
///
/// Keys are `manager/name` strings (see [`PackageIdentity::key`]). Reruns
/// overwrite the prior entry; no verification history is kept, only latest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationMap {
    entries: BTreeMap<String, VerificationStatus>,
}

impl VerificationMap {
    /// Load from the state directory (missing/corrupt file → empty).
    pub fn load(state: &StateDir) -> Self {
        state.load_or_default(&state.verification_file())
    }

    /// Persist the map.
    pub fn save(&self, state: &StateDir) -> Result<()> {
        state.save_json(&state.verification_file(), self)
    }

    /// Latest stored status for an identity, if ever checked.
    pub fn get(&self, identity: &PackageIdentity) -> Option<&VerificationStatus> {
        self.entries.get(&identity.key())
    }

    /// Status for an identity, or the unverified placeholder.
    pub fn status_or_unverified(&self, identity: &PackageIdentity) -> VerificationStatus {
        self.get(identity)
            .cloned()
            .unwrap_or_else(VerificationStatus::unverified)
    }

    /// Store the latest result for an identity, replacing any prior entry.
    pub fn set(&mut self, identity: &PackageIdentity, status: VerificationStatus) {
        self.entries.insert(identity.key(), status);
    }

    /// Number of identities ever checked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been checked yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
