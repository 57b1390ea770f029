//! pkgscope - Local package inventory across pip, Homebrew, and npm.
//!
//! pkgscope shells out to the package managers already on the machine,
//! parses their output into one common record shape, and layers
//! verification, conflict heuristics, uninstall history, and CSV export on
//! top. Every operation can emit a JSON document for an external dashboard.
//!
//! # Modules
//!
//! - [`api`] - JSON boundary documents for the presentation layer
//! - [`cli`] - Command-line interface and argument parsing
//! - [`collector`] - Record shapes and collection across managers
//! - [`conflicts`] - Heuristic conflict rules and scanning
//! - [`error`] - Error types and result aliases
//! - [`export`] - CSV export
//! - [`fsutil`] - Directory sizing and size formatting
//! - [`managers`] - Per-manager adapters (pip, Homebrew, npm)
//! - [`shell`] - Subprocess execution with timeouts
//! - [`state`] - Persisted snapshots, statuses, markers, and history
//! - [`ui`] - Terminal output
//! - [`verify`] - Verification orchestration and status types
//!
//! # Example
//!
//! ```no_run
//! use pkgscope::collector::Collector;
//! use pkgscope::conflicts::RuleRegistry;
//!
//! let outcome = Collector::collect_all();
//! let findings = RuleRegistry::with_builtins().scan(&outcome.records);
//! println!("{} packages, {} conflicts", outcome.records.len(), findings.len());
//! ```

pub mod api;
pub mod cli;
pub mod collector;
pub mod conflicts;
pub mod error;
pub mod export;
pub mod fsutil;
pub mod managers;
pub mod shell;
pub mod state;
pub mod ui;
pub mod verify;

pub use error::{PkgscopeError, Result};
