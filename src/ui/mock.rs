//! Mock UI for tests.

use super::{OutputMode, UserInterface};

/// Records every message instead of printing.
#[derive(Debug, Default)]
pub struct MockUI {
    /// Captured output lines, each prefixed with its kind.
    pub lines: Vec<String>,
}

impl MockUI {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Captured warnings only.
    pub fn warnings(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.starts_with("warning:"))
            .map(String::as_str)
            .collect()
    }

    /// Captured errors only.
    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.starts_with("error:"))
            .map(String::as_str)
            .collect()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        OutputMode::Normal
    }

    fn message(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.lines.push(format!("success: {msg}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("error: {msg}"));
    }

    fn show_header(&mut self, title: &str) {
        self.lines.push(format!("header: {title}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_captures_all_kinds() {
        let mut ui = MockUI::new();
        ui.show_header("Packages");
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("boom");

        assert_eq!(ui.lines.len(), 5);
        assert!(ui.contains("Packages"));
        assert_eq!(ui.warnings().len(), 1);
        assert_eq!(ui.errors().len(), 1);
    }
}
