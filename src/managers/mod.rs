//! Manager adapters.
//!
//! One adapter per package manager (pip, Homebrew, npm). Each knows how to
//! list installed packages, verify one package, and uninstall one package by
//! invoking that manager's command-line tool and translating its output into
//! the common record shape.
//!
//! Adapters are a fixed table keyed by the [`Manager`] enum — see
//! [`adapter_for`]. There is no dynamic lookup by name.

pub mod brew;
pub mod npm;
pub mod pip;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collector::PackageRecord;
use crate::error::Result;
use crate::verify::VerificationStatus;

pub use brew::BrewAdapter;
pub use npm::NpmAdapter;
pub use pip::PipAdapter;

/// A supported package manager.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Manager {
    /// Python packages via pip.
    Pip,
    /// Homebrew formulae and casks.
    Brew,
    /// Globally installed npm packages.
    Npm,
}

impl Manager {
    /// All supported managers, in collection order.
    pub const ALL: [Manager; 3] = [Manager::Pip, Manager::Brew, Manager::Npm];

    /// Lowercase name used in persisted keys and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Manager::Pip => "pip",
            Manager::Brew => "brew",
            Manager::Npm => "npm",
        }
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Manager {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pip" => Ok(Manager::Pip),
            "brew" => Ok(Manager::Brew),
            "npm" => Ok(Manager::Npm),
            other => Err(format!("unknown manager: {other}")),
        }
    }
}

/// Shared capability interface implemented by every manager adapter.
pub trait ManagerAdapter: Send + Sync {
    /// The manager this adapter wraps.
    fn manager(&self) -> Manager;

    /// List installed packages.
    ///
    /// Fails if the underlying tool is absent or its output is entirely
    /// unusable; the collector degrades that manager to zero records and
    /// surfaces an advisory. Individual unparsable lines are skipped, never
    /// fatal.
    fn list(&self) -> Result<Vec<PackageRecord>>;

    /// Verify one package.
    ///
    /// Fails soft: if the verification command itself cannot run, the result
    /// is an `unknown` status with an explanatory message, never an error.
    fn verify(&self, name: &str) -> VerificationStatus;

    /// Uninstall one package, returning a human-readable success message.
    fn uninstall(&self, name: &str) -> Result<String>;
}

static PIP: PipAdapter = PipAdapter;
static BREW: BrewAdapter = BrewAdapter;
static NPM: NpmAdapter = NpmAdapter;

/// Resolve the adapter for a manager from the fixed dispatch table.
pub fn adapter_for(manager: Manager) -> &'static dyn ManagerAdapter {
    match manager {
        Manager::Pip => &PIP,
        Manager::Brew => &BREW,
        Manager::Npm => &NPM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_display_is_lowercase() {
        assert_eq!(Manager::Pip.to_string(), "pip");
        assert_eq!(Manager::Brew.to_string(), "brew");
        assert_eq!(Manager::Npm.to_string(), "npm");
    }

    #[test]
    fn manager_from_str_round_trips() {
        for manager in Manager::ALL {
            assert_eq!(Manager::from_str(manager.as_str()), Ok(manager));
        }
    }

    #[test]
    fn manager_from_str_rejects_unknown() {
        assert!(Manager::from_str("apt").is_err());
    }

    #[test]
    fn manager_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Manager::Brew).unwrap(), "\"brew\"");
        let back: Manager = serde_json::from_str("\"npm\"").unwrap();
        assert_eq!(back, Manager::Npm);
    }

    #[test]
    fn adapter_table_covers_every_manager() {
        for manager in Manager::ALL {
            assert_eq!(adapter_for(manager).manager(), manager);
        }
    }
}
