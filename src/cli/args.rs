//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::managers::Manager;

/// pkgscope - Local package inventory across pip, Homebrew, and npm.
#[derive(Debug, Parser)]
#[command(name = "pkgscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory for persisted state (defaults to ~/.pkgscope)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect installed packages from every manager (default if no command specified)
    Collect(CollectArgs),

    /// Verify one package, or every collected package with --all
    Verify(VerifyArgs),

    /// Scan the collected package set for known conflicts
    Conflicts(ConflictsArgs),

    /// Show removal history
    History(HistoryArgs),

    /// Uninstall a package through its manager
    Uninstall(UninstallArgs),

    /// Export the collected package set as CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `collect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CollectArgs {
    /// Emit the JSON boundary document instead of human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, clap::Args)]
pub struct VerifyArgs {
    /// Package name to verify
    pub name: Option<String>,

    /// Manager owning the package
    #[arg(short, long, value_enum)]
    pub manager: Option<Manager>,

    /// Verify every package in a fresh collection
    #[arg(long, conflicts_with = "name")]
    pub all: bool,

    /// Worker threads for --all
    #[arg(long, default_value_t = 4)]
    pub jobs: usize,

    /// Emit the JSON boundary document instead of human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `conflicts` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConflictsArgs {
    /// Emit the JSON boundary document instead of human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HistoryArgs {
    /// Maximum entries to show (most recent first)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Emit the JSON boundary document instead of human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UninstallArgs {
    /// Package name to uninstall
    pub name: String,

    /// Manager owning the package
    #[arg(short, long, value_enum)]
    pub manager: Manager,

    /// Confirm the uninstall (required; there is no interactive prompt)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Emit the JSON boundary document instead of human output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Write CSV to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
