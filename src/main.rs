//! pkgscope CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pkgscope::cli::{Cli, CommandDispatcher};
use pkgscope::state::StateDir;
use pkgscope::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN (collection progress stays on the UI, not the log)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pkgscope=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pkgscope=warn"))
    };

    // logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("pkgscope starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let state = StateDir::resolve(cli.state_dir.clone());
    let mut ui = create_ui(output_mode);

    let dispatcher = CommandDispatcher::new(state);
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
