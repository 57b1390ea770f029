//! pip adapter.
//!
//! Lists packages via `python3 -m pip list --format=json` with a plain-text
//! fallback, verifies by importing the module in a child interpreter (plus an
//! optional pip-audit pass), and uninstalls via `pip uninstall -y`.

use serde::Deserialize;

use crate::collector::PackageRecord;
use crate::error::{PkgscopeError, Result};
use crate::managers::{Manager, ManagerAdapter};
use crate::shell::{run_tool, tool_exists, DEFAULT_TIMEOUT};
use crate::verify::VerificationStatus;

const PYTHON: &str = "python3";

/// Adapter for pip-managed Python packages.
pub struct PipAdapter;

#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
    version: String,
}

impl ManagerAdapter for PipAdapter {
    fn manager(&self) -> Manager {
        Manager::Pip
    }

    fn list(&self) -> Result<Vec<PackageRecord>> {
        if !tool_exists(PYTHON) {
            return Err(PkgscopeError::ToolMissing {
                tool: PYTHON.into(),
            });
        }

        let out = run_tool(
            PYTHON,
            &["-m", "pip", "list", "--format=json"],
            DEFAULT_TIMEOUT,
        )?;

        if let Some(records) = parse_pip_json(&out.stdout) {
            tracing::debug!(count = records.len(), "pip list parsed as JSON");
            return Ok(records);
        }
        if !out.success {
            return Err(PkgscopeError::CommandFailed {
                command: "python3 -m pip list".into(),
                code: out.exit_code,
            });
        }
        Ok(parse_pip_text(&out.stdout))
    }

    fn verify(&self, name: &str) -> VerificationStatus {
        if !tool_exists(PYTHON) {
            return VerificationStatus::unknown("python3 not found on PATH");
        }

        let module = import_name(name);
        let import = run_tool(
            PYTHON,
            &["-c", &format!("import {module}")],
            DEFAULT_TIMEOUT,
        );

        match import {
            Ok(out) if out.success => match audit_vulnerability_count(name) {
                Some(count) if count > 0 => VerificationStatus::failed(format!(
                    "Package has {count} known vulnerabilities"
                )),
                _ => VerificationStatus::verified(format!("Module '{module}' imports cleanly")),
            },
            Ok(out) => {
                let detail = last_nonempty_line(&out.stderr)
                    .unwrap_or_else(|| "import failed".to_string());
                VerificationStatus::failed(detail)
            }
            Err(e) => VerificationStatus::unknown(e.to_string()),
        }
    }

    fn uninstall(&self, name: &str) -> Result<String> {
        if !tool_exists(PYTHON) {
            return Err(PkgscopeError::ToolMissing {
                tool: PYTHON.into(),
            });
        }
        let out = run_tool(
            PYTHON,
            &["-m", "pip", "uninstall", "-y", name],
            DEFAULT_TIMEOUT,
        )?;
        if out.success {
            Ok(format!("Uninstalled {name} via pip"))
        } else {
            Err(PkgscopeError::CommandFailed {
                command: format!("python3 -m pip uninstall -y {name}"),
                code: out.exit_code,
            })
        }
    }
}

/// Distribution name to importable module name: lowercased, `-` becomes `_`.
fn import_name(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Run pip-audit and count vulnerabilities reported for `name`.
///
/// Returns None when the audit tool is unavailable or its output is not
/// usable; a successful import is never downgraded by a broken audit.
fn audit_vulnerability_count(name: &str) -> Option<usize> {
    let out = run_tool(
        PYTHON,
        &["-m", "pip_audit", "--format", "json"],
        DEFAULT_TIMEOUT,
    )
    .ok()?;
    parse_audit_count(&out.stdout, name)
}

fn parse_audit_count(raw: &str, name: &str) -> Option<usize> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    let deps = value.get("dependencies")?.as_array()?;
    let wanted = name.to_lowercase();
    for dep in deps {
        let dep_name = dep.get("name").and_then(|n| n.as_str())?;
        if dep_name.to_lowercase() == wanted {
            return Some(dep.get("vulns").and_then(|v| v.as_array()).map_or(0, |v| v.len()));
        }
    }
    Some(0)
}

fn parse_pip_json(raw: &str) -> Option<Vec<PackageRecord>> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let entries: Vec<PipListEntry> = serde_json::from_str(trimmed).ok()?;
    Some(
        entries
            .into_iter()
            .map(|entry| PackageRecord {
                manager: Manager::Pip,
                name: entry.name,
                version: entry.version,
                size_bytes: 0,
                install_path: String::new(),
            })
            .collect(),
    )
}

/// Fallback parser for the plain-text `pip list` table.
///
/// First column is the name, second the version; header and separator lines
/// are skipped, as is anything without two columns.
fn parse_pip_text(raw: &str) -> Vec<PackageRecord> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.to_lowercase().starts_with("package"))
        .filter(|line| !line.starts_with('-'))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let version = parts.next()?;
            Some(PackageRecord {
                manager: Manager::Pip,
                name: name.to_string(),
                version: version.to_string(),
                size_bytes: 0,
                install_path: String::new(),
            })
        })
        .collect()
}

fn last_nonempty_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_name_normalizes() {
        assert_eq!(import_name("typing-extensions"), "typing_extensions");
        assert_eq!(import_name("PyYAML"), "pyyaml");
    }

    #[test]
    fn parse_json_list() {
        let raw = r#"[{"name": "numpy", "version": "1.26.4"}, {"name": "requests", "version": "2.31.0"}]"#;
        let records = parse_pip_json(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "numpy");
        assert_eq!(records[0].version, "1.26.4");
        assert_eq!(records[0].manager, Manager::Pip);
    }

    #[test]
    fn parse_json_rejects_non_array() {
        assert!(parse_pip_json("WARNING: pip is out of date").is_none());
        assert!(parse_pip_json("").is_none());
    }

    #[test]
    fn parse_text_skips_header_and_separator() {
        let raw = "Package    Version\n---------- -------\nnumpy      1.26.4\nrequests   2.31.0\n";
        let records = parse_pip_text(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "requests");
        assert_eq!(records[1].version, "2.31.0");
    }

    #[test]
    fn parse_text_skips_lines_without_version() {
        let raw = "numpy 1.26.4\norphan\n";
        let records = parse_pip_text(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "numpy");
    }

    #[test]
    fn parse_audit_counts_matching_package() {
        let raw = r#"{"dependencies": [
            {"name": "requests", "version": "2.19.0", "vulns": [{"id": "PYSEC-1"}, {"id": "PYSEC-2"}]},
            {"name": "numpy", "version": "1.26.4", "vulns": []}
        ]}"#;
        assert_eq!(parse_audit_count(raw, "requests"), Some(2));
        assert_eq!(parse_audit_count(raw, "numpy"), Some(0));
        assert_eq!(parse_audit_count(raw, "flask"), Some(0));
    }

    #[test]
    fn parse_audit_tolerates_garbage() {
        assert_eq!(parse_audit_count("not json", "requests"), None);
        assert_eq!(parse_audit_count("{}", "requests"), None);
    }

    #[test]
    fn last_nonempty_line_picks_final_error() {
        let traceback = "Traceback (most recent call last):\n  File \"<string>\"\nModuleNotFoundError: No module named 'nope'\n\n";
        assert_eq!(
            last_nonempty_line(traceback),
            Some("ModuleNotFoundError: No module named 'nope'".to_string())
        );
    }
}
