//! History tracking across collection passes.

use crate::collector::PackageRecord;
use crate::error::Result;
use crate::state::layout::StateDir;
use crate::state::pending::PendingRemovals;
use crate::state::removals::RemovalLog;
use crate::state::snapshot::{diff, HistoryEntry, Snapshot};

/// Detects removals between collection passes and maintains the log.
pub struct HistoryTracker {
    state: StateDir,
}

impl HistoryTracker {
    /// Create a tracker over a state directory.
    pub fn new(state: StateDir) -> Self {
        Self { state }
    }

    /// Diff the previous snapshot against `records`, log removals, and
    /// persist `records` as the new last-known snapshot.
    ///
    /// Returns the removal entries detected by this pass. The first pass
    /// (no previous snapshot) detects nothing.
    pub fn record_snapshot(&self, records: &[PackageRecord]) -> Result<Vec<HistoryEntry>> {
        let previous: Snapshot = self.state.load_or_default(&self.state.snapshot_file());
        let current = Snapshot::from_records(records);
        let mut pending = PendingRemovals::load(&self.state);

        let removals = if previous.is_initial() {
            Vec::new()
        } else {
            diff(&previous, &current, &mut pending)
        };

        if !removals.is_empty() {
            tracing::info!(count = removals.len(), "removals detected since last snapshot");
            let mut log = RemovalLog::load(&self.state);
            log.append(removals.iter().cloned());
            log.save(&self.state)?;
        }

        pending.save(&self.state)?;
        self.state.save_json(&self.state.snapshot_file(), &current)?;

        Ok(removals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::PackageIdentity;
    use crate::managers::Manager;
    use crate::state::snapshot::RemovalSource;
    use tempfile::TempDir;

    fn record(manager: Manager, name: &str, version: &str) -> PackageRecord {
        PackageRecord {
            manager,
            name: name.into(),
            version: version.into(),
            size_bytes: 0,
            install_path: String::new(),
        }
    }

    #[test]
    fn first_pass_detects_nothing() {
        let temp = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(StateDir::at(temp.path()));

        let removals = tracker
            .record_snapshot(&[record(Manager::Pip, "requests", "2.25")])
            .unwrap();

        assert!(removals.is_empty());
    }

    #[test]
    fn second_pass_detects_external_removal() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        let tracker = HistoryTracker::new(state.clone());

        tracker
            .record_snapshot(&[record(Manager::Pip, "requests", "2.25")])
            .unwrap();
        let removals = tracker.record_snapshot(&[]).unwrap();

        assert_eq!(removals.len(), 1);
        assert_eq!(removals[0].name, "requests");
        assert_eq!(removals[0].version, "2.25");
        assert_eq!(removals[0].source, RemovalSource::External);

        // and the log was persisted
        let log = RemovalLog::load(&state);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn pending_marker_classifies_dashboard_removal() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        let tracker = HistoryTracker::new(state.clone());

        tracker
            .record_snapshot(&[record(Manager::Brew, "wget", "1.21")])
            .unwrap();

        let mut pending = PendingRemovals::load(&state);
        pending.mark(PackageIdentity::new(Manager::Brew, "wget"));
        pending.save(&state).unwrap();

        let removals = tracker.record_snapshot(&[]).unwrap();

        assert_eq!(removals.len(), 1);
        assert_eq!(removals[0].source, RemovalSource::Dashboard);

        // marker consumed
        assert!(PendingRemovals::load(&state).is_empty());
    }

    #[test]
    fn unchanged_set_logs_nothing() {
        let temp = TempDir::new().unwrap();
        let state = StateDir::at(temp.path());
        let tracker = HistoryTracker::new(state.clone());

        let records = [record(Manager::Npm, "typescript", "5.4.5")];
        tracker.record_snapshot(&records).unwrap();
        let removals = tracker.record_snapshot(&records).unwrap();

        assert!(removals.is_empty());
        assert!(RemovalLog::load(&state).is_empty());
    }
}
