//! Uninstall command implementation.
//!
//! Marks a pending removal, then invokes the manager's uninstall command.
//! The marker lets the next collection's snapshot diff classify the
//! disappearance as dashboard-initiated; a failed uninstall clears it again.

use crate::api::UninstallResponse;
use crate::cli::args::UninstallArgs;
use crate::collector::PackageIdentity;
use crate::error::Result;
use crate::managers::adapter_for;
use crate::state::{PendingRemovals, StateDir};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::render_json;

/// The uninstall command implementation.
pub struct UninstallCommand {
    state: StateDir,
    args: UninstallArgs,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(state: StateDir, args: UninstallArgs) -> Self {
        Self { state, args }
    }

    fn respond(
        &self,
        ui: &mut dyn UserInterface,
        response: UninstallResponse,
    ) -> Result<CommandResult> {
        let result = if response.success {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        };
        if self.args.json {
            ui.message(&render_json(&response)?);
        } else if response.success {
            ui.success(&response.message);
        } else {
            ui.error(&response.message);
        }
        Ok(result)
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.yes {
            ui.error(&format!(
                "Refusing to uninstall {} without --yes",
                self.args.name
            ));
            return Ok(CommandResult::failure(2));
        }

        let identity = PackageIdentity::new(self.args.manager, self.args.name.clone());

        // Mark first: the next snapshot diff classifies the disappearance
        // as dashboard-initiated only if the marker predates it.
        let mut pending = PendingRemovals::load(&self.state);
        pending.mark(identity.clone());
        pending.save(&self.state)?;

        match adapter_for(self.args.manager).uninstall(&self.args.name) {
            Ok(message) => self.respond(
                ui,
                UninstallResponse {
                    success: true,
                    message,
                },
            ),
            Err(err) => {
                // roll the marker back so the failed attempt cannot
                // misclassify a later external removal
                let mut pending = PendingRemovals::load(&self.state);
                pending.consume(&identity);
                pending.save(&self.state)?;

                self.respond(
                    ui,
                    UninstallResponse {
                        success: false,
                        message: err.to_string(),
                    },
                )
            }
        }
    }
}
