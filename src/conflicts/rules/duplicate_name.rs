//! Duplicate package name across managers.

use std::collections::BTreeMap;

use crate::collector::PackageRecord;
use crate::conflicts::finding::{ConflictFinding, Severity};
use crate::conflicts::rule::ConflictRule;

/// Flags the same package name (case-insensitive) installed under more than
/// one manager.
pub struct DuplicateNameRule;

impl ConflictRule for DuplicateNameRule {
    fn id(&self) -> &'static str {
        "duplicate-name"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn check(&self, records: &[PackageRecord]) -> Vec<ConflictFinding> {
        let mut by_name: BTreeMap<String, Vec<&PackageRecord>> = BTreeMap::new();
        for record in records {
            by_name
                .entry(record.name.to_lowercase())
                .or_default()
                .push(record);
        }

        by_name
            .into_iter()
            .filter(|(_, group)| group.len() > 1)
            .map(|(name, group)| {
                let mut packages: Vec<_> = group.iter().map(|r| r.identity()).collect();
                packages.sort();
                ConflictFinding {
                    rule: self.id().to_string(),
                    severity: self.severity(),
                    description: format!("Found {} installations of {}", group.len(), name),
                    suggestion: "Consider removing duplicate installations".to_string(),
                    packages,
                }
            })
            .collect()
    }
}
