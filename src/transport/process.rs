//! Child process execution
//!
//! Runs a client program with an explicit argument list (no shell), captures
//! stdout as the response body and turns failures into exit codes.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command as TokioCommand;

use super::Delivery;
use crate::common::{Error, Result};

/// Exit code for a client program that could not be found, as shells report it
pub const EXIT_CLIENT_NOT_FOUND: i32 = 127;

/// Exit code for a client program that exists but cannot be executed
pub const EXIT_CLIENT_NOT_EXECUTABLE: i32 = 126;

/// Base added to a signal number when the child was killed by a signal
const SIGNAL_EXIT_BASE: i32 = 128;

/// Run `program` with `args` to completion and capture its output
pub async fn capture(program: &Path, args: &[String]) -> Result<Delivery> {
    tracing::debug!(program = %program.display(), ?args, "spawning client");

    let output = match TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Delivery::Failed {
                exit_code: EXIT_CLIENT_NOT_FOUND,
                reason: format!("{}: command not found", program.display()),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Ok(Delivery::Failed {
                exit_code: EXIT_CLIENT_NOT_EXECUTABLE,
                reason: format!("{}: permission denied", program.display()),
            });
        }
        Err(e) => return Err(Error::client_spawn(&program.display().to_string(), e)),
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if !output.status.success() {
        let exit_code = exit_code_of(output.status);
        tracing::debug!(exit_code, stderr, "client failed");
        let reason = if stderr.is_empty() {
            format!("{} exited with code {}", program.display(), exit_code)
        } else {
            stderr.to_string()
        };
        return Ok(Delivery::Failed { exit_code, reason });
    }

    if !stderr.is_empty() {
        tracing::debug!(stderr, "client wrote to stderr");
    }

    Ok(Delivery::Body(
        String::from_utf8_lossy(&output.stdout).into_owned(),
    ))
}

/// Exit code to propagate for a finished child
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }

    1
}
