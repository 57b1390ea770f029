//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`].

pub mod collect;
pub mod completions;
pub mod conflicts;
pub mod dispatcher;
pub mod export;
pub mod history;
pub mod uninstall;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::error::{PkgscopeError, Result};

/// Render a boundary document as pretty JSON.
pub(crate) fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PkgscopeError::Other(e.into()))
}
