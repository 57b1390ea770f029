//! Storage pressure from large packages.

use crate::collector::PackageRecord;
use crate::conflicts::finding::{ConflictFinding, Severity};
use crate::conflicts::rule::ConflictRule;

/// Size above which a package counts as large.
const LARGE_PACKAGE_BYTES: u64 = 100 * 1024 * 1024;

/// How many large packages are tolerated before a finding fires.
const LARGE_PACKAGE_LIMIT: usize = 5;

/// Flags an accumulation of packages each larger than 100 MiB.
pub struct OversizedInstallsRule;

impl ConflictRule for OversizedInstallsRule {
    fn id(&self) -> &'static str {
        "oversized-installs"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn check(&self, records: &[PackageRecord]) -> Vec<ConflictFinding> {
        let mut large: Vec<&PackageRecord> = records
            .iter()
            .filter(|r| r.size_bytes > LARGE_PACKAGE_BYTES)
            .collect();

        if large.len() <= LARGE_PACKAGE_LIMIT {
            return vec![];
        }

        large.sort_by(|a, b| a.identity().cmp(&b.identity()));
        vec![ConflictFinding {
            rule: self.id().to_string(),
            severity: self.severity(),
            description: format!("Found {} packages larger than 100 MB", large.len()),
            suggestion: "Consider reviewing large packages for cleanup".to_string(),
            packages: large.iter().map(|r| r.identity()).collect(),
        }]
    }
}
