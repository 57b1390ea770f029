//! Export command implementation.
//!
//! The `pkgscope export` command serializes a fresh collection as CSV,
//! to stdout or a file.

use std::fs;

use crate::cli::args::ExportArgs;
use crate::collector::Collector;
use crate::error::Result;
use crate::export::to_csv;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The export command implementation.
pub struct ExportCommand {
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(args: ExportArgs) -> Self {
        Self { args }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = Collector::collect_all();
        for advisory in &outcome.advisories {
            ui.warning(&format!("{} skipped: {}", advisory.manager, advisory.message));
        }

        let csv = to_csv(&outcome.records);

        match &self.args.output {
            Some(path) => {
                fs::write(path, csv)?;
                ui.success(&format!(
                    "Wrote {} records to {}",
                    outcome.records.len(),
                    path.display()
                ));
            }
            None => {
                // raw document on stdout, independent of output mode
                print!("{csv}");
            }
        }

        Ok(CommandResult::success())
    }
}
