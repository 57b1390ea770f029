//! Library integration tests for the collection/verification/history
//! pipeline over a temporary state directory.

use pkgscope::collector::{AggregateStats, PackageIdentity, PackageRecord};
use pkgscope::conflicts::RuleRegistry;
use pkgscope::export::{from_csv, to_csv};
use pkgscope::managers::Manager;
use pkgscope::state::{
    HistoryTracker, PendingRemovals, RemovalLog, RemovalSource, StateDir, VerificationMap,
};
use pkgscope::verify::{VerificationStatus, VerifyState};
use pkgscope::PkgscopeError;
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
fn error_types_are_public() {
    let err = PkgscopeError::ToolMissing { tool: "npm".into() };
    assert!(err.to_string().contains("npm"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> pkgscope::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn external_removal_is_detected_and_logged() {
    let temp = TempDir::new().unwrap();
    let state = StateDir::at(temp.path());
    let tracker = HistoryTracker::new(state.clone());

    // first pass: requests is installed
    let first = vec![
        record(Manager::Pip, "requests", "2.25"),
        record(Manager::Pip, "numpy", "1.26.4"),
    ];
    assert!(tracker.record_snapshot(&first).unwrap().is_empty());

    // second pass: requests vanished without any dashboard action
    let second = vec![record(Manager::Pip, "numpy", "1.26.4")];
    let removals = tracker.record_snapshot(&second).unwrap();

    assert_eq!(removals.len(), 1);
    assert_eq!(removals[0].manager, Manager::Pip);
    assert_eq!(removals[0].name, "requests");
    assert_eq!(removals[0].version, "2.25");
    assert_eq!(removals[0].source, RemovalSource::External);

    // the log survives a fresh load
    let log = RemovalLog::load(&state);
    assert_eq!(log.len(), 1);
    assert_eq!(log.recent(10)[0].name, "requests");
}

#[test]
fn marked_removal_is_classified_as_dashboard() {
    let temp = TempDir::new().unwrap();
    let state = StateDir::at(temp.path());
    let tracker = HistoryTracker::new(state.clone());

    tracker
        .record_snapshot(&[record(Manager::Npm, "typescript", "5.4.5")])
        .unwrap();

    // the uninstall handler marks before invoking the manager
    let mut pending = PendingRemovals::load(&state);
    pending.mark(PackageIdentity::new(Manager::Npm, "typescript"));
    pending.save(&state).unwrap();

    let removals = tracker.record_snapshot(&[]).unwrap();

    assert_eq!(removals.len(), 1);
    assert_eq!(removals[0].source, RemovalSource::Dashboard);
    assert!(PendingRemovals::load(&state).is_empty());
}

#[test]
fn verification_status_overwrite_law() {
    let temp = TempDir::new().unwrap();
    let state = StateDir::at(temp.path());
    let identity = PackageIdentity::new(Manager::Pip, "requests");

    let mut map = VerificationMap::load(&state);
    map.set(&identity, VerificationStatus::failed("import error"));
    map.save(&state).unwrap();

    let mut map = VerificationMap::load(&state);
    map.set(&identity, VerificationStatus::verified("ok"));
    map.save(&state).unwrap();

    let map = VerificationMap::load(&state);
    assert_eq!(map.len(), 1);
    let status = map.get(&identity).unwrap();
    assert_eq!(status.state, VerifyState::Verified);
    assert_eq!(status.message, "ok");
}

#[test]
fn conflict_scan_is_order_independent() {
    let registry = RuleRegistry::with_builtins();
    let records = vec![
        record(Manager::Pip, "numpy", "1.19.5"),
        record(Manager::Pip, "pandas", "2.1.0"),
        record(Manager::Npm, "numpy", "0.0.1"),
        record(Manager::Brew, "wget", "1.21.3_1"),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let forward = registry.scan(&records);
    let backward = registry.scan(&reversed);

    assert_eq!(forward, backward);
    let rules: Vec<&str> = forward.iter().map(|f| f.rule.as_str()).collect();
    assert!(rules.contains(&"incompatible-versions"));
    assert!(rules.contains(&"duplicate-name"));
}

#[test]
fn csv_round_trip_preserves_tuples() {
    let records = vec![
        record(Manager::Pip, "requests", "2.25"),
        PackageRecord {
            manager: Manager::Brew,
            name: "wget".into(),
            version: "1.21.3_1".into(),
            size_bytes: 4194304,
            install_path: "/opt/homebrew/opt/wget".into(),
        },
        record(Manager::Npm, "@types/node", "20.12.7"),
    ];

    let parsed = from_csv(&to_csv(&records));

    let original: Vec<_> = records
        .iter()
        .map(|r| (r.manager, r.name.clone(), r.version.clone(), r.size_bytes))
        .collect();
    let round_tripped: Vec<_> = parsed
        .iter()
        .map(|r| (r.manager, r.name.clone(), r.version.clone(), r.size_bytes))
        .collect();
    assert_eq!(original, round_tripped);
}

#[test]
fn corrupt_state_files_degrade_to_empty() {
    let temp = TempDir::new().unwrap();
    let state = StateDir::at(temp.path());
    std::fs::write(state.snapshot_file(), "{broken").unwrap();
    std::fs::write(state.history_file(), "also broken").unwrap();
    std::fs::write(state.verification_file(), "[]").unwrap();
    std::fs::write(state.pending_file(), "42").unwrap();

    // none of these panic or error; all fall back to empty state
    assert!(RemovalLog::load(&state).is_empty());
    assert!(VerificationMap::load(&state).is_empty());
    assert!(PendingRemovals::load(&state).is_empty());

    let tracker = HistoryTracker::new(state.clone());
    let removals = tracker
        .record_snapshot(&[record(Manager::Pip, "numpy", "1.26.4")])
        .unwrap();
    // corrupt previous snapshot acts like a first run
    assert!(removals.is_empty());
}

#[test]
fn stats_recompute_identically_for_identical_records() {
    let records = vec![
        record(Manager::Pip, "numpy", "1.26.4"),
        record(Manager::Brew, "wget", "1.21.3_1"),
    ];
    assert_eq!(
        AggregateStats::compute(&records),
        AggregateStats::compute(&records)
    );
}

#[test]
fn identities_are_distinct_per_manager() {
    let records = vec![
        record(Manager::Pip, "requests", "2.25"),
        record(Manager::Npm, "requests", "0.2.0"),
    ];
    let stats = AggregateStats::compute(&records);
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.per_manager.len(), 2);
}
