//! Homebrew adapter.
//!
//! Lists formulae and casks via `brew info --json=v2 --installed` with a
//! `brew list --versions` text fallback, verifies via `brew audit --strict`,
//! and uninstalls via `brew uninstall`.

use std::path::{Path, PathBuf};

use crate::collector::PackageRecord;
use crate::error::{PkgscopeError, Result};
use crate::fsutil::dir_size;
use crate::managers::{Manager, ManagerAdapter};
use crate::shell::{run_tool, tool_exists, DEFAULT_TIMEOUT};
use crate::verify::VerificationStatus;

const BREW: &str = "brew";

/// Adapter for Homebrew formulae and casks.
pub struct BrewAdapter;

/// One entry parsed out of brew's JSON, before paths are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BrewEntry {
    name: String,
    version: String,
    declared_size: Option<u64>,
}

impl ManagerAdapter for BrewAdapter {
    fn manager(&self) -> Manager {
        Manager::Brew
    }

    fn list(&self) -> Result<Vec<PackageRecord>> {
        if !tool_exists(BREW) {
            return Err(PkgscopeError::ToolMissing { tool: BREW.into() });
        }

        let prefix = run_tool(BREW, &["--prefix"], DEFAULT_TIMEOUT)
            .map(|out| out.stdout.trim().to_string())
            .unwrap_or_default();

        let out = run_tool(BREW, &["info", "--json=v2", "--installed"], DEFAULT_TIMEOUT)?;
        if let Some(entries) = parse_brew_json(&out.stdout) {
            tracing::debug!(count = entries.len(), "brew info parsed as JSON v2");
            return Ok(entries
                .into_iter()
                .map(|entry| resolve_entry(entry, &prefix))
                .collect());
        }

        // fallback: simple list, e.g. "wget 1.21.3_1"
        let fallback = run_tool(BREW, &["list", "--versions"], DEFAULT_TIMEOUT)?;
        if !fallback.success {
            return Err(PkgscopeError::CommandFailed {
                command: "brew list --versions".into(),
                code: fallback.exit_code,
            });
        }
        Ok(parse_brew_text(&fallback.stdout)
            .into_iter()
            .map(|entry| resolve_entry(entry, &prefix))
            .collect())
    }

    fn verify(&self, name: &str) -> VerificationStatus {
        if !tool_exists(BREW) {
            return VerificationStatus::unknown("brew not found on PATH");
        }
        match run_tool(BREW, &["audit", "--strict", name], DEFAULT_TIMEOUT) {
            Ok(out) => {
                let combined = format!("{}{}", out.stdout, out.stderr);
                let combined = combined.trim();
                if out.success && (combined.is_empty() || combined.contains("No problems")) {
                    VerificationStatus::verified("Audit reported no problems")
                } else if out.success {
                    VerificationStatus::verified(truncate(combined, 200))
                } else {
                    VerificationStatus::failed(format!(
                        "Audit issues: {}",
                        truncate(combined, 200)
                    ))
                }
            }
            Err(e) => VerificationStatus::unknown(e.to_string()),
        }
    }

    fn uninstall(&self, name: &str) -> Result<String> {
        if !tool_exists(BREW) {
            return Err(PkgscopeError::ToolMissing { tool: BREW.into() });
        }
        let out = run_tool(BREW, &["uninstall", name], DEFAULT_TIMEOUT)?;
        if out.success {
            Ok(format!("Uninstalled {name} via Homebrew"))
        } else {
            Err(PkgscopeError::CommandFailed {
                command: format!("brew uninstall {name}"),
                code: out.exit_code,
            })
        }
    }
}

/// Attach install path and size to a parsed entry.
///
/// Checks the conventional locations under the brew prefix; a size declared
/// in the JSON wins over walking the install directory.
fn resolve_entry(entry: BrewEntry, prefix: &str) -> PackageRecord {
    let install_path = if prefix.is_empty() {
        String::new()
    } else {
        ["opt", "Cellar", "Caskroom"]
            .iter()
            .map(|dir| Path::new(prefix).join(dir).join(&entry.name))
            .find(|p| p.exists())
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default()
    };

    let size_bytes = entry.declared_size.unwrap_or_else(|| {
        if install_path.is_empty() {
            0
        } else {
            dir_size(&PathBuf::from(&install_path))
        }
    });

    PackageRecord {
        manager: Manager::Brew,
        name: entry.name,
        version: entry.version,
        size_bytes,
        install_path,
    }
}

/// Parse `brew info --json=v2 --installed` output.
///
/// Both `formulae` and `casks` collections are possible in v2. Entries
/// without a usable name are skipped.
fn parse_brew_json(raw: &str) -> Option<Vec<BrewEntry>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    let mut entries = Vec::new();
    for coll in ["formulae", "casks"] {
        let Some(items) = value.get(coll).and_then(|c| c.as_array()) else {
            continue;
        };
        for item in items {
            let name = item
                .get("name")
                .and_then(|n| n.as_str())
                .or_else(|| item.get("token").and_then(|t| t.as_str()));
            let Some(name) = name else { continue };

            let installed = item.get("installed").and_then(|i| i.as_array());
            let last_install = installed.and_then(|list| list.last());

            let version = last_install
                .and_then(|i| i.get("version"))
                .and_then(|v| v.as_str())
                .or_else(|| {
                    item.get("versions")
                        .and_then(|v| v.get("stable"))
                        .and_then(|v| v.as_str())
                })
                .or_else(|| item.get("version").and_then(|v| v.as_str()))
                .unwrap_or_default();

            let declared_size = last_install
                .and_then(|i| i.get("size"))
                .and_then(|s| s.as_u64());

            entries.push(BrewEntry {
                name: name.to_string(),
                version: version.to_string(),
                declared_size,
            });
        }
    }
    Some(entries)
}

/// Fallback parser for `brew list --versions` lines like `wget 1.21.3_1`.
fn parse_brew_text(raw: &str) -> Vec<BrewEntry> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let rest: Vec<&str> = parts.collect();
            if rest.is_empty() {
                return None;
            }
            Some(BrewEntry {
                name: name.to_string(),
                version: rest.join(" "),
                declared_size: None,
            })
        })
        .collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}…")
    }
}
