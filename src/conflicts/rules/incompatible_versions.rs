//! Known-incompatible version pairs.

use crate::collector::PackageRecord;
use crate::conflicts::finding::{ConflictFinding, Severity};
use crate::conflicts::rule::ConflictRule;
use crate::conflicts::version::{version_ge, version_lt};
use crate::managers::Manager;

/// One curated incompatibility: `package` below `below` together with
/// `other` at or above `other_at_least`.
struct VersionPair {
    manager: Manager,
    package: &'static str,
    below: &'static str,
    other: &'static str,
    other_at_least: &'static str,
    note: &'static str,
}

/// The curated table. Treated as configuration: entries are added here, not
/// inferred from data.
const KNOWN_BAD_PAIRS: &[VersionPair] = &[VersionPair {
    manager: Manager::Pip,
    package: "numpy",
    below: "1.20",
    other: "pandas",
    other_at_least: "2.0",
    note: "pandas 2.x requires numpy 1.20 or newer",
}];

/// Flags package pairs known to be mutually incompatible at the installed
/// versions.
pub struct IncompatibleVersionsRule;

impl ConflictRule for IncompatibleVersionsRule {
    fn id(&self) -> &'static str {
        "incompatible-versions"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn check(&self, records: &[PackageRecord]) -> Vec<ConflictFinding> {
        KNOWN_BAD_PAIRS
            .iter()
            .filter_map(|pair| {
                let first = find(records, pair.manager, pair.package)?;
                let second = find(records, pair.manager, pair.other)?;
                if version_lt(&first.version, pair.below)
                    && version_ge(&second.version, pair.other_at_least)
                {
                    let mut packages = vec![first.identity(), second.identity()];
                    packages.sort();
                    Some(ConflictFinding {
                        rule: self.id().to_string(),
                        severity: self.severity(),
                        description: format!(
                            "{} {} conflicts with {} {}: {}",
                            pair.package, first.version, pair.other, second.version, pair.note
                        ),
                        suggestion: format!(
                            "Upgrade {} to {} or newer, or downgrade {}",
                            pair.package, pair.below, pair.other
                        ),
                        packages,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

fn find<'a>(
    records: &'a [PackageRecord],
    manager: Manager,
    name: &str,
) -> Option<&'a PackageRecord> {
    records
        .iter()
        .find(|r| r.manager == manager && r.name.eq_ignore_ascii_case(name))
}
