//! Collection across all managers with a partial-results policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::collector::record::{AggregateStats, PackageRecord};
use crate::managers::{adapter_for, Manager};

/// Non-fatal warning for a manager that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub manager: Manager,
    pub message: String,
}

/// Result of one collection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectOutcome {
    /// Ordered records, `(manager, name)` unique.
    pub records: Vec<PackageRecord>,

    /// Aggregate stats over `records`.
    pub stats: AggregateStats,

    /// Managers that contributed zero records, with the reason.
    pub advisories: Vec<Advisory>,
}

/// Collects installed packages from every manager adapter.
pub struct Collector;

impl Collector {
    /// Collect from all managers.
    ///
    /// Adapters run independently: a failure in one contributes an advisory
    /// and zero records without blocking the others. Records are kept in
    /// adapter output order, managers in enum order, and deduplicated by
    /// identity (first occurrence wins) so `(manager, name)` pairs are
    /// unique.
    pub fn collect_all() -> CollectOutcome {
        let mut merged = Vec::new();
        let mut advisories = Vec::new();

        for manager in Manager::ALL {
            match adapter_for(manager).list() {
                Ok(records) => {
                    tracing::info!(%manager, count = records.len(), "collected packages");
                    merged.extend(records);
                }
                Err(err) => {
                    tracing::warn!(%manager, error = %err, "manager skipped");
                    advisories.push(Advisory {
                        manager,
                        message: err.to_string(),
                    });
                }
            }
        }

        let records = dedupe_by_identity(merged);
        let stats = AggregateStats::compute(&records);

        CollectOutcome {
            records,
            stats,
            advisories,
        }
    }
}

/// Drop later records that repeat an already-seen identity, keeping order.
fn dedupe_by_identity(records: Vec<PackageRecord>) -> Vec<PackageRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert((record.manager, record.name.clone())))
        .collect()
}
