//! Package record shapes shared by all manager adapters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::managers::Manager;

/// One installed package as reported by a manager.
///
/// Records are produced fresh on every collection pass and are immutable for
/// that pass. Identity is `(manager, name)`; the same logical name under two
/// managers is two distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Manager that reported this package.
    pub manager: Manager,

    /// Package name, unique within a manager.
    pub name: String,

    /// Manager-native version string (not necessarily semver).
    pub version: String,

    /// Installed size in bytes, best effort (0 when unknown).
    #[serde(default)]
    pub size_bytes: u64,

    /// Install location, best effort (empty when unknown).
    #[serde(default)]
    pub install_path: String,
}

impl PackageRecord {
    /// The identity key of this record.
    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity {
            manager: self.manager,
            name: self.name.clone(),
        }
    }
}

/// The `(manager, name)` pair uniquely identifying a package record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub manager: Manager,
    pub name: String,
}

impl PackageIdentity {
    /// Create an identity.
    pub fn new(manager: Manager, name: impl Into<String>) -> Self {
        Self {
            manager,
            name: name.into(),
        }
    }

    /// String key used in persisted JSON maps, e.g. `pip/requests`.
    ///
    /// Only the first `/` separates manager from name, so scoped npm names
    /// like `@types/node` survive the round trip.
    pub fn key(&self) -> String {
        format!("{}/{}", self.manager, self.name)
    }

    /// Parse a persisted map key back into an identity.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (manager, name) = key.split_once('/')?;
        if name.is_empty() {
            return None;
        }
        let manager = Manager::from_str(manager).ok()?;
        Some(Self::new(manager, name))
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.manager, self.name)
    }
}

/// Aggregate statistics over a collected record sequence.
///
/// A pure function of the records; recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of records.
    pub total_count: usize,

    /// Sum of known package sizes in bytes.
    pub total_size_bytes: u64,

    /// Record count per manager.
    pub per_manager: BTreeMap<Manager, usize>,
}

impl AggregateStats {
    /// Compute stats for a record sequence.
    pub fn compute(records: &[PackageRecord]) -> Self {
        let mut per_manager = BTreeMap::new();
        let mut total_size_bytes = 0u64;
        for record in records {
            *per_manager.entry(record.manager).or_insert(0) += 1;
            total_size_bytes += record.size_bytes;
        }
        Self {
            total_count: records.len(),
            total_size_bytes,
            per_manager,
        }
    }
}
