//! Append-only removal history log.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::layout::StateDir;
use crate::state::snapshot::HistoryEntry;

/// Persisted log of removal events, oldest first.
///
/// Entries are never mutated after write; the log is capped at the most
/// recent [`RemovalLog::RETENTION`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemovalLog {
    entries: Vec<HistoryEntry>,
}

impl RemovalLog {
    /// Maximum number of entries kept.
    pub const RETENTION: usize = 100;

    /// Load from the state directory (missing/corrupt file → empty).
    pub fn load(state: &StateDir) -> Self {
        state.load_or_default(&state.history_file())
    }

    /// Persist the log.
    pub fn save(&self, state: &StateDir) -> Result<()> {
        state.save_json(&state.history_file(), self)
    }

    /// Append removal events, dropping the oldest entries past retention.
    pub fn append(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.entries.extend(entries);
        if self.entries.len() > Self::RETENTION {
            let excess = self.entries.len() - Self::RETENTION;
            self.entries.drain(..excess);
        }
    }

    /// Most recent entries first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of logged events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
