//! Styled terminal output.

use console::style;

use super::{OutputMode, UserInterface};

/// Terminal implementation of [`UserInterface`].
pub struct TerminalUI {
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI with the given output mode.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    fn suppressed(&self) -> bool {
        self.mode == OutputMode::Quiet
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if !self.suppressed() {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        if !self.suppressed() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        // warnings always print, even in quiet mode
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{} {}", style("error:").red().bold(), msg);
    }

    fn show_header(&mut self, title: &str) {
        if !self.suppressed() {
            println!();
            println!("{}", style(title).bold());
            println!("{}", style("─".repeat(title.chars().count())).dim());
        }
    }
}
