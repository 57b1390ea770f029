//! Collect command implementation.
//!
//! The `pkgscope collect` command gathers installed packages from every
//! manager, diffs against the previous snapshot, and reports the set with
//! aggregate stats.

use crate::api::CollectResponse;
use crate::cli::args::CollectArgs;
use crate::collector::Collector;
use crate::error::Result;
use crate::fsutil::format_size;
use crate::state::{HistoryTracker, StateDir};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::render_json;

/// The collect command implementation.
pub struct CollectCommand {
    state: StateDir,
    args: CollectArgs,
}

impl CollectCommand {
    /// Create a new collect command.
    pub fn new(state: StateDir, args: CollectArgs) -> Self {
        Self { state, args }
    }
}

impl Command for CollectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = Collector::collect_all();

        let tracker = HistoryTracker::new(self.state.clone());
        let removals = tracker.record_snapshot(&outcome.records)?;

        if self.args.json {
            let response = CollectResponse {
                packages: outcome.records,
                stats: outcome.stats,
                advisories: outcome.advisories,
                removals,
            };
            ui.message(&render_json(&response)?);
            return Ok(CommandResult::success());
        }

        ui.show_header("Installed Packages");
        for record in &outcome.records {
            ui.message(&format!(
                "{:<5} {:<36} {:<18} {:>10}",
                record.manager,
                record.name,
                record.version,
                format_size(record.size_bytes)
            ));
        }

        ui.message("");
        for (manager, count) in &outcome.stats.per_manager {
            ui.message(&format!("{manager}: {count} packages"));
        }
        ui.message(&format!(
            "Total: {} packages, {}",
            outcome.stats.total_count,
            format_size(outcome.stats.total_size_bytes)
        ));

        for advisory in &outcome.advisories {
            ui.warning(&format!("{} skipped: {}", advisory.manager, advisory.message));
        }

        for removal in &removals {
            ui.message(&format!(
                "Removed since last run: {}/{} {} ({})",
                removal.manager,
                removal.name,
                removal.version,
                match removal.source {
                    crate::state::RemovalSource::Dashboard => "uninstalled here",
                    crate::state::RemovalSource::External => "removed externally",
                }
            ));
        }

        Ok(CommandResult::success())
    }
}
