//! History command implementation.
//!
//! The `pkgscope history` command shows the removal log, most recent first.

use crate::api::HistoryResponse;
use crate::cli::args::HistoryArgs;
use crate::error::Result;
use crate::state::{RemovalLog, RemovalSource, StateDir};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::render_json;

/// Default number of entries shown without --limit.
const DEFAULT_LIMIT: usize = 20;

/// The history command implementation.
pub struct HistoryCommand {
    state: StateDir,
    args: HistoryArgs,
}

impl HistoryCommand {
    /// Create a new history command.
    pub fn new(state: StateDir, args: HistoryArgs) -> Self {
        Self { state, args }
    }
}

impl Command for HistoryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let log = RemovalLog::load(&self.state);
        let limit = self.args.limit.unwrap_or(DEFAULT_LIMIT);
        let entries = log.recent(limit);

        if self.args.json {
            ui.message(&render_json(&HistoryResponse { entries })?);
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            ui.message("No removal history.");
            return Ok(CommandResult::success());
        }

        ui.show_header("Removal History");
        for entry in &entries {
            let source = match entry.source {
                RemovalSource::Dashboard => "[uninstalled]",
                RemovalSource::External => "[external]",
            };
            ui.message(&format!(
                "{:<13} {} {}/{} {}",
                source,
                entry.removed_at.format("%Y-%m-%d %H:%M"),
                entry.manager,
                entry.name,
                entry.version
            ));
        }
        ui.message("");
        ui.message(&format!("{} of {} entries", entries.len(), log.len()));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn empty_log_reports_no_history() {
        let temp = TempDir::new().unwrap();
        let cmd = HistoryCommand::new(StateDir::at(temp.path()), HistoryArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.contains("No removal history."));
    }

    #[test]
    fn json_output_is_valid_on_empty_log() {
        let temp = TempDir::new().unwrap();
        let cmd = HistoryCommand::new(
            StateDir::at(temp.path()),
            HistoryArgs {
                limit: None,
                json: true,
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.lines[0]).unwrap();
        assert!(parsed["entries"].as_array().unwrap().is_empty());
    }
}
