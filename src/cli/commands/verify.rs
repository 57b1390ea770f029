//! Verify command implementation.
//!
//! `pkgscope verify <name> --manager <m>` checks one package;
//! `pkgscope verify --all` fans the whole collection out over a bounded
//! worker pool and reports a batch summary.

use crate::api::{VerifyAllResponse, VerifyResponse};
use crate::cli::args::VerifyArgs;
use crate::collector::{Collector, PackageIdentity};
use crate::error::Result;
use crate::state::StateDir;
use crate::ui::UserInterface;
use crate::verify::{Verifier, VerifyState};

use super::dispatcher::{Command, CommandResult};
use super::render_json;

/// The verify command implementation.
pub struct VerifyCommand {
    state: StateDir,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(state: StateDir, args: VerifyArgs) -> Self {
        Self { state, args }
    }

    fn verify_all(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = Collector::collect_all();
        for advisory in &outcome.advisories {
            ui.warning(&format!("{} skipped: {}", advisory.manager, advisory.message));
        }

        let identities: Vec<PackageIdentity> =
            outcome.records.iter().map(|r| r.identity()).collect();

        let verifier = Verifier::new(self.state.clone());
        let (summary, results) = verifier.verify_all(identities, self.args.jobs)?;

        if self.args.json {
            let response = VerifyAllResponse {
                summary,
                statuses: results
                    .into_iter()
                    .map(|(identity, status)| VerifyResponse {
                        manager: identity.manager,
                        name: identity.name,
                        status,
                    })
                    .collect(),
            };
            ui.message(&render_json(&response)?);
            return Ok(CommandResult::success());
        }

        ui.show_header("Verification");
        for (identity, status) in &results {
            ui.message(&format!(
                "{:<10} {:<42} {}",
                status.state.as_str(),
                identity.to_string(),
                status.message
            ));
        }
        ui.message("");
        ui.message(&format!(
            "{} checked: {} verified, {} failed, {} unknown",
            summary.total, summary.verified, summary.failed, summary.unknown
        ));

        Ok(CommandResult::success())
    }

    fn verify_one(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (Some(name), Some(manager)) = (self.args.name.as_ref(), self.args.manager) else {
            ui.error("Provide a package name with --manager, or use --all");
            return Ok(CommandResult::failure(2));
        };

        let identity = PackageIdentity::new(manager, name.clone());
        let verifier = Verifier::new(self.state.clone());
        let status = verifier.verify_one(&identity)?;

        if self.args.json {
            let response = VerifyResponse {
                manager: identity.manager,
                name: identity.name,
                status,
            };
            ui.message(&render_json(&response)?);
            return Ok(CommandResult::success());
        }

        match status.state {
            VerifyState::Verified => ui.success(&format!("{identity}: {}", status.message)),
            VerifyState::Failed => ui.error(&format!("{identity}: {}", status.message)),
            _ => ui.warning(&format!("{identity}: {}", status.message)),
        }

        if status.state == VerifyState::Failed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.all {
            self.verify_all(ui)
        } else {
            self.verify_one(ui)
        }
    }
}
