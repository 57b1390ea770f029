//! Rule registry for conflict scanning.

use crate::collector::PackageRecord;
use crate::conflicts::finding::ConflictFinding;
use crate::conflicts::rule::ConflictRule;
use crate::conflicts::rules::{
    DuplicateNameRule, IncompatibleVersionsRule, OversizedInstallsRule,
};

/// Ordered registry of conflict rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn ConflictRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DuplicateNameRule));
        registry.register(Box::new(IncompatibleVersionsRule));
        registry.register(Box::new(OversizedInstallsRule));
        registry
    }

    /// Register a rule.
    pub fn register(&mut self, rule: Box<dyn ConflictRule>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule over the record set.
    ///
    /// The output is sorted by (rule id, first package) so the finding set is
    /// the same regardless of record input order.
    pub fn scan(&self, records: &[PackageRecord]) -> Vec<ConflictFinding> {
        let mut findings: Vec<ConflictFinding> = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(records))
            .collect();
        findings.sort_by(|a, b| {
            (&a.rule, a.packages.first()).cmp(&(&b.rule, b.packages.first()))
        });
        findings
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::Manager;

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
    fn builtins_are_registered() {
        let registry = RuleRegistry::with_builtins();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.scan(&[record(Manager::Pip, "numpy", "1.0")]).is_empty());
    }

    #[test]
    fn scan_is_deterministic_under_permutation() {
        let registry = RuleRegistry::with_builtins();
        let a = record(Manager::Pip, "numpy", "1.19.5");
        let b = record(Manager::Pip, "pandas", "2.1.0");
        let c = record(Manager::Npm, "pandas", "0.0.1");

        let forward = registry.scan(&[a.clone(), b.clone(), c.clone()]);
        let backward = registry.scan(&[c, b, a]);

        assert_eq!(forward, backward);
        assert!(!forward.is_empty());
    }

    #[test]
    fn scan_collects_findings_from_multiple_rules() {
        let registry = RuleRegistry::with_builtins();
        let records = vec![
            record(Manager::Pip, "numpy", "1.19.5"),
            record(Manager::Pip, "pandas", "2.1.0"),
            record(Manager::Npm, "pandas", "0.0.1"),
        ];

        let findings = registry.scan(&records);
        let rules: Vec<&str> = findings.iter().map(|f| f.rule.as_str()).collect();

        assert!(rules.contains(&"duplicate-name"));
        assert!(rules.contains(&"incompatible-versions"));
    }
}
