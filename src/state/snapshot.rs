//! Collection snapshots and removal diffing.
//!
//! A snapshot is the full `(manager, name) → version` set observed at one
//! collection pass. Diffing the previous snapshot against the current one
//! detects packages removed since the last run; the pending-removal markers
//! decide whether a disappearance was dashboard-initiated or external.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collector::{PackageIdentity, PackageRecord};
use crate::managers::Manager;
use crate::state::pending::PendingRemovals;

/// One package identity plus its version at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub manager: Manager,
    pub name: String,
    pub version: String,
}

impl SnapshotEntry {
    /// Identity of this entry.
    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity::new(self.manager, self.name.clone())
    }
}

/// The last-known package set, persisted whole-file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// When this snapshot was taken (None for the empty pre-first-run state).
    pub taken_at: Option<DateTime<Utc>>,

    /// Identities and versions observed.
    pub packages: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Build a snapshot from a collected record set, stamped now.
    pub fn from_records(records: &[PackageRecord]) -> Self {
        Self {
            taken_at: Some(Utc::now()),
            packages: records
                .iter()
                .map(|record| SnapshotEntry {
                    manager: record.manager,
                    name: record.name.clone(),
                    version: record.version.clone(),
                })
                .collect(),
        }
    }

    /// Whether an identity is present in this snapshot.
    pub fn contains(&self, identity: &PackageIdentity) -> bool {
        self.packages
            .iter()
            .any(|entry| entry.manager == identity.manager && entry.name == identity.name)
    }

    /// Whether this is the pre-first-run empty state.
    pub fn is_initial(&self) -> bool {
        self.taken_at.is_none()
    }
}

/// How a package left the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalSource {
    /// Removed through the uninstall operation (a pending marker matched).
    Dashboard,
    /// Vanished from a collection with no matching marker.
    External,
}

/// One removal event in the append-only history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub manager: Manager,
    pub name: String,

    /// Version at the time of removal (from the previous snapshot).
    pub version: String,

    pub removed_at: DateTime<Utc>,
    pub source: RemovalSource,
}

/// Diff two snapshots into removal entries.
///
/// Identities present in `previous` and absent from `current` become
/// removals. A pending marker for the identity classifies the removal as
/// dashboard-initiated and is consumed; otherwise the removal is external.
/// Output is sorted by `(manager, name)` so the result is deterministic.
pub fn diff(
    previous: &Snapshot,
    current: &Snapshot,
    pending: &mut PendingRemovals,
) -> Vec<HistoryEntry> {
    let removed_at = Utc::now();
    let mut entries: Vec<HistoryEntry> = previous
        .packages
        .iter()
        .filter(|entry| !current.contains(&entry.identity()))
        .map(|entry| {
            let source = if pending.consume(&entry.identity()) {
                RemovalSource::Dashboard
            } else {
                RemovalSource::External
            };
            HistoryEntry {
                manager: entry.manager,
                name: entry.name.clone(),
                version: entry.version.clone(),
                removed_at,
                source,
            }
        })
        .collect();
    entries.sort_by(|a, b| (a.manager, &a.name).cmp(&(b.manager, &b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(Manager, &str, &str)]) -> Snapshot {
        Snapshot {
            taken_at: Some(Utc::now()),
            packages: entries
                .iter()
                .map(|(manager, name, version)| SnapshotEntry {
                    manager: *manager,
                    name: name.to_string(),
                    version: version.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn diff_detects_single_removal() {
        let previous = snapshot(&[
            (Manager::Pip, "a", "1"),
            (Manager::Pip, "b", "2"),
            (Manager::Pip, "c", "3"),
        ]);
        let current = snapshot(&[(Manager::Pip, "a", "1"), (Manager::Pip, "c", "3")]);
        let mut pending = PendingRemovals::default();

        let entries = diff(&previous, &current, &mut pending);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "b");
        assert_eq!(entries[0].version, "2");
        assert_eq!(entries[0].source, RemovalSource::External);
    }

    #[test]
    fn diff_classifies_pending_marker_as_dashboard() {
        let previous = snapshot(&[(Manager::Pip, "a", "1"), (Manager::Pip, "b", "2")]);
        let current = snapshot(&[(Manager::Pip, "a", "1")]);
        let mut pending = PendingRemovals::default();
        pending.mark(PackageIdentity::new(Manager::Pip, "b"));

        let entries = diff(&previous, &current, &mut pending);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, RemovalSource::Dashboard);
        // marker is consumed
        assert!(!pending.is_marked(&PackageIdentity::new(Manager::Pip, "b")));
    }

    #[test]
    fn diff_external_removal_scenario() {
        let previous = snapshot(&[(Manager::Pip, "requests", "2.25")]);
        let current = snapshot(&[]);
        let mut pending = PendingRemovals::default();

        let entries = diff(&previous, &current, &mut pending);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].manager, Manager::Pip);
        assert_eq!(entries[0].name, "requests");
        assert_eq!(entries[0].version, "2.25");
        assert_eq!(entries[0].source, RemovalSource::External);
    }

    #[test]
    fn diff_same_name_other_manager_is_distinct() {
        let previous = snapshot(&[(Manager::Pip, "requests", "2.25"), (Manager::Npm, "requests", "0.2")]);
        let current = snapshot(&[(Manager::Npm, "requests", "0.2")]);
        let mut pending = PendingRemovals::default();

        let entries = diff(&previous, &current, &mut pending);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].manager, Manager::Pip);
    }

    #[test]
    fn diff_no_changes_is_empty() {
        let previous = snapshot(&[(Manager::Brew, "wget", "1.21")]);
        let current = previous.clone();
        let mut pending = PendingRemovals::default();

        assert!(diff(&previous, &current, &mut pending).is_empty());
    }

    #[test]
    fn diff_output_is_sorted() {
        let previous = snapshot(&[
            (Manager::Npm, "zz", "1"),
            (Manager::Pip, "aa", "1"),
            (Manager::Pip, "bb", "1"),
        ]);
        let current = snapshot(&[]);
        let mut pending = PendingRemovals::default();

        let entries = diff(&previous, &current, &mut pending);

        let names: Vec<_> = entries
            .iter()
            .map(|e| format!("{}/{}", e.manager, e.name))
            .collect();
        assert_eq!(names, vec!["pip/aa", "pip/bb", "npm/zz"]);
    }

    #[test]
    fn initial_snapshot_is_flagged() {
        assert!(Snapshot::default().is_initial());
        assert!(!snapshot(&[]).is_initial());
    }

    #[test]
    fn history_entry_serializes_source_lowercase() {
        let entry = HistoryEntry {
            manager: Manager::Pip,
            name: "requests".into(),
            version: "2.25".into(),
            removed_at: Utc::now(),
            source: RemovalSource::External,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"external\""));
    }
}
