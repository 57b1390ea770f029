//! Heuristic conflict detection.
//!
//! An ordered list of rule value-objects is applied over the full collected
//! record set. Rules inspect names and versions only, are independent of one
//! another, and carry a static severity. This is explicitly heuristic, not a
//! constraint solver: false positives and negatives are acceptable by design.

pub mod finding;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod version;

pub use finding::{ConflictFinding, Severity};
pub use registry::RuleRegistry;
pub use rule::ConflictRule;
