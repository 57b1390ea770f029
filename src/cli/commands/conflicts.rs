//! Conflicts command implementation.
//!
//! The `pkgscope conflicts` command scans a fresh collection with the
//! built-in heuristic rules.

use crate::api::ConflictsResponse;
use crate::cli::args::ConflictsArgs;
use crate::collector::Collector;
use crate::conflicts::RuleRegistry;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::render_json;

/// The conflicts command implementation.
pub struct ConflictsCommand {
    args: ConflictsArgs,
}

impl ConflictsCommand {
    /// Create a new conflicts command.
    pub fn new(args: ConflictsArgs) -> Self {
        Self { args }
    }
}

impl Command for ConflictsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = Collector::collect_all();
        for advisory in &outcome.advisories {
            ui.warning(&format!("{} skipped: {}", advisory.manager, advisory.message));
        }

        let findings = RuleRegistry::with_builtins().scan(&outcome.records);

        if self.args.json {
            ui.message(&render_json(&ConflictsResponse { findings })?);
            return Ok(CommandResult::success());
        }

        if findings.is_empty() {
            ui.success("No conflicts detected");
            return Ok(CommandResult::success());
        }

        ui.show_header("Conflicts");
        for finding in &findings {
            ui.message(&format!(
                "[{}] {}: {}",
                finding.severity, finding.rule, finding.description
            ));
            for identity in &finding.packages {
                ui.message(&format!("    {identity}"));
            }
            ui.message(&format!("    Suggestion: {}", finding.suggestion));
        }
        ui.message("");
        ui.message(&format!("{} conflicts found", findings.len()));

        Ok(CommandResult::success())
    }
}
