//! Subprocess execution for package-manager tools.

pub mod command;

pub use command::{run_tool, tool_exists, ToolOutput, DEFAULT_TIMEOUT};
