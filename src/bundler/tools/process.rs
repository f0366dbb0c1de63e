//! Child process helpers shared by the tool wrappers.

use crate::bundler::error::{Error, Result};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Runs `cmd` to completion with stdout/stderr captured.
pub(super) async fn run_captured(cmd: &mut Command, command: &str) -> Result<Output> {
    log::debug!("Running {}", command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.to_string(),
            error,
        })
}

/// Runs `cmd` with the parent's stdout/stderr so tool output passes through.
pub(super) async fn run_inherited(
    cmd: &mut Command,
    command: &str,
) -> Result<std::process::ExitStatus> {
    log::debug!("Running {}", command);
    cmd.stdin(Stdio::null())
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.to_string(),
            error,
        })
}

/// Exit status plus trimmed stderr, for error messages.
pub(super) fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, stderr)
    }
}
