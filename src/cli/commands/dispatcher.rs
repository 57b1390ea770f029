//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, CollectArgs, Commands};
use crate::error::Result;
use crate::state::StateDir;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    state: StateDir,
}

impl CommandDispatcher {
    /// Create a new dispatcher over a state directory.
    pub fn new(state: StateDir) -> Self {
        Self { state }
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, `collect` runs with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Collect(args)) => {
                let cmd = super::collect::CollectCommand::new(self.state.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Verify(args)) => {
                let cmd = super::verify::VerifyCommand::new(self.state.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Conflicts(args)) => {
                let cmd = super::conflicts::ConflictsCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::History(args)) => {
                let cmd = super::history::HistoryCommand::new(self.state.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Uninstall(args)) => {
                let cmd = super::uninstall::UninstallCommand::new(self.state.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Export(args)) => {
                let cmd = super::export::ExportCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::collect::CollectCommand::new(
                    self.state.clone(),
                    CollectArgs::default(),
                );
                cmd.execute(ui)
            }
        }
    }
}
