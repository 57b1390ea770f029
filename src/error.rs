//! Error types for pkgscope operations.
//!
//! This module defines [`PkgscopeError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Manager/tool failures are contained at the adapter boundary and become
//!   partial results plus an advisory, never a fatal error for a whole run
//! - Verification problems become a stored status, not a propagated error
//! - Unreadable state files degrade to empty state with a warning
//! - Use `anyhow::Error` (via `PkgscopeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pkgscope operations.
#[derive(Debug, Error)]
pub enum PkgscopeError {
    /// A package manager CLI is not installed or not on PATH.
    #[error("Required tool not found on PATH: {tool}")]
    ToolMissing { tool: String },

    /// A manager produced output we could not interpret.
    #[error("Failed to parse {tool} output: {message}")]
    Parse { tool: String, message: String },

    /// Subprocess exited with a failure code.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Subprocess exceeded its timeout and was killed.
    #[error("Command timed out after {secs}s: {command}")]
    CommandTimeout { command: String, secs: u64 },

    /// A verification command could not produce a usable result.
    #[error("Verification of '{name}' failed: {message}")]
    Verification { name: String, message: String },

    /// A persisted state file could not be read or written.
    #[error("State file error at {path}: {message}")]
    Persistence { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pkgscope operations.
pub type Result<T> = std::result::Result<T, PkgscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_missing_displays_tool() {
        let err = PkgscopeError::ToolMissing { tool: "npm".into() };
        assert!(err.to_string().contains("npm"));
    }

    #[test]
    fn parse_error_displays_tool_and_message() {
        let err = PkgscopeError::Parse {
            tool: "brew".into(),
            message: "unexpected token".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("brew"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PkgscopeError::CommandFailed {
            command: "brew audit wget".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("brew audit wget"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn command_timeout_displays_seconds() {
        let err = PkgscopeError::CommandTimeout {
            command: "npm ls -g".into(),
            secs: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("npm ls -g"));
        assert!(msg.contains("60"));
    }

    #[test]
    fn verification_displays_name_and_message() {
        let err = PkgscopeError::Verification {
            name: "requests".into(),
            message: "import failed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("requests"));
        assert!(msg.contains("import failed"));
    }

    #[test]
    fn persistence_displays_path() {
        let err = PkgscopeError::Persistence {
            path: PathBuf::from("/tmp/state/snapshot.json"),
            message: "invalid JSON".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("snapshot.json"));
        assert!(msg.contains("invalid JSON"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PkgscopeError = io_err.into();
        assert!(matches!(err, PkgscopeError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PkgscopeError::ToolMissing { tool: "pip".into() })
        }
        assert!(returns_error().is_err());
    }
}
