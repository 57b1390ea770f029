//! npm adapter (global installs).
//!
//! Lists via `npm ls -g --depth=0 --json` with a tree-text fallback, verifies
//! with `npm audit` against the package's directory under the global prefix,
//! and uninstalls via `npm uninstall -g`.

use std::path::{Path, PathBuf};

use crate::collector::PackageRecord;
use crate::error::{PkgscopeError, Result};
use crate::fsutil::dir_size;
use crate::managers::{Manager, ManagerAdapter};
use crate::shell::{run_tool, tool_exists, DEFAULT_TIMEOUT};
use crate::verify::VerificationStatus;

const NPM: &str = "npm";

/// Adapter for globally installed npm packages.
pub struct NpmAdapter;

impl ManagerAdapter for NpmAdapter {
    fn manager(&self) -> Manager {
        Manager::Npm
    }

    fn list(&self) -> Result<Vec<PackageRecord>> {
        if !tool_exists(NPM) {
            return Err(PkgscopeError::ToolMissing { tool: NPM.into() });
        }

        let prefix = global_prefix();

        // npm ls exits non-zero for trees with problems while still emitting
        // valid JSON, so the exit code alone is not a failure.
        let out = run_tool(NPM, &["ls", "-g", "--depth=0", "--json"], DEFAULT_TIMEOUT)?;
        let pairs = match parse_npm_json(&out.stdout) {
            Some(pairs) => pairs,
            None => {
                if !out.success && out.stdout.trim().is_empty() {
                    return Err(PkgscopeError::CommandFailed {
                        command: "npm ls -g --depth=0 --json".into(),
                        code: out.exit_code,
                    });
                }
                parse_npm_tree(&out.stdout)
            }
        };
        tracing::debug!(count = pairs.len(), "npm global packages listed");

        Ok(pairs
            .into_iter()
            .map(|(name, version)| {
                let install_path = prefix
                    .as_ref()
                    .map(|p| package_dir(p, &name))
                    .filter(|p| p.exists())
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();
                let size_bytes = if install_path.is_empty() {
                    0
                } else {
                    dir_size(&PathBuf::from(&install_path))
                };
                PackageRecord {
                    manager: Manager::Npm,
                    name,
                    version,
                    size_bytes,
                    install_path,
                }
            })
            .collect())
    }

    fn verify(&self, name: &str) -> VerificationStatus {
        if !tool_exists(NPM) {
            return VerificationStatus::unknown("npm not found on PATH");
        }
        let Some(prefix) = global_prefix() else {
            return VerificationStatus::unknown("Could not determine npm global prefix");
        };
        let dir = package_dir(&prefix, name);
        if !dir.exists() {
            return VerificationStatus::unknown(format!(
                "Package directory not found under {}",
                prefix.display()
            ));
        }

        let dir_str = dir.to_string_lossy().to_string();
        match run_tool(
            NPM,
            &["audit", "--audit-level=moderate", "--prefix", &dir_str],
            DEFAULT_TIMEOUT,
        ) {
            Ok(out) => {
                if out.stdout.contains("found 0 vulnerabilities") {
                    VerificationStatus::verified("npm audit found no vulnerabilities")
                } else {
                    VerificationStatus::failed("npm audit reported vulnerabilities")
                }
            }
            Err(e) => VerificationStatus::unknown(e.to_string()),
        }
    }

    fn uninstall(&self, name: &str) -> Result<String> {
        if !tool_exists(NPM) {
            return Err(PkgscopeError::ToolMissing { tool: NPM.into() });
        }
        let out = run_tool(NPM, &["uninstall", "-g", name], DEFAULT_TIMEOUT)?;
        if out.success {
            Ok(format!("Uninstalled {name} via npm"))
        } else {
            Err(PkgscopeError::CommandFailed {
                command: format!("npm uninstall -g {name}"),
                code: out.exit_code,
            })
        }
    }
}

fn global_prefix() -> Option<PathBuf> {
    let out = run_tool(NPM, &["config", "get", "prefix"], DEFAULT_TIMEOUT).ok()?;
    let trimmed = out.stdout.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn package_dir(prefix: &Path, name: &str) -> PathBuf {
    prefix.join("lib").join("node_modules").join(name)
}

/// Parse `npm ls -g --depth=0 --json`: a `dependencies` object keyed by name.
fn parse_npm_json(raw: &str) -> Option<Vec<(String, String)>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    let deps = value.get("dependencies")?.as_object()?;
    let mut pairs: Vec<(String, String)> = deps
        .iter()
        .map(|(name, meta)| {
            let version = meta
                .get("version")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            (name.clone(), version.to_string())
        })
        .collect();
    pairs.sort();
    Some(pairs)
}

/// Fallback parser for tree output lines like `├── typescript@5.4.5`.
///
/// The version is everything after the last `@`, so scoped names such as
/// `@types/node@20.12.7` split correctly.
fn parse_npm_tree(raw: &str) -> Vec<(String, String)> {
    raw.lines()
        .filter(|line| line.contains("── "))
        .filter_map(|line| {
            let entry = line.split("── ").nth(1)?.trim();
            let at = entry.rfind('@')?;
            if at == 0 {
                return None;
            }
            let (name, version) = entry.split_at(at);
            Some((name.to_string(), version[1..].to_string()))
        })
        .collect()
}
