//! Package-manager subprocess execution.
//!
//! Every adapter call goes through [`run_tool`], which spawns the program
//! directly (argv vector, no shell), captures stdout/stderr, and enforces a
//! hard timeout so a hung external tool cannot stall a whole run.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::error::{PkgscopeError, Result};

/// Default timeout for a single package-manager invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured result of running an external tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the tool exited with code 0.
    pub success: bool,
}

/// Run a tool with arguments, capturing output, bounded by `timeout`.
///
/// The child is killed and reaped if the timeout expires. A non-zero exit is
/// NOT an error here — callers decide whether a failing exit still carries
/// usable output (npm, for instance, exits non-zero while emitting valid
/// JSON for a tree with problems).
pub fn run_tool(program: &str, args: &[&str], timeout: Duration) -> Result<ToolOutput> {
    let start = Instant::now();
    let rendered = render_command(program, args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| PkgscopeError::CommandFailed {
            command: rendered.clone(),
            code: None,
        })?;

    // Drain pipes on separate threads so a chatty child can never fill a
    // pipe buffer and deadlock against wait_timeout.
    let stdout = child.stdout.take().unwrap();
    let stderr = child.stderr.take().unwrap();

    let stdout_handle = thread::spawn(move || read_to_string_lossy(stdout));
    let stderr_handle = thread::spawn(move || read_to_string_lossy(stderr));

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PkgscopeError::CommandTimeout {
                command: rendered,
                secs: timeout.as_secs(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    Ok(ToolOutput {
        exit_code: status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
        success: status.success(),
    })
}

/// Check whether a tool is resolvable on PATH.
///
/// Iterates PATH entries directly instead of shelling out to `which`, whose
/// behavior varies across systems.
pub fn tool_exists(program: &str) -> bool {
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| is_executable(&dir.join(program)))
}

fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn read_to_string_lossy(mut reader: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).to_string()
}

#[cfg(unix)]
fn is_executable(path: &PathBuf) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &PathBuf) -> bool {
    path.is_file()
}
