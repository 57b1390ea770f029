//! Persisted state.
//!
//! A small number of JSON files under one state directory — verification
//! status map, last-known snapshot, pending-removal markers, and the removal
//! history log — each independently loadable/saveable as a whole document.
//! Last writer wins; the system assumes a single interactive user.

pub mod layout;
pub mod pending;
pub mod removals;
pub mod snapshot;
pub mod tracker;
pub mod verification;

pub use layout::StateDir;
pub use pending::PendingRemovals;
pub use removals::RemovalLog;
pub use snapshot::{HistoryEntry, RemovalSource, Snapshot, SnapshotEntry};
pub use tracker::HistoryTracker;
pub use verification::VerificationMap;
