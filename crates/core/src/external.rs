//! External calls that are allowed to fail.
//!
//! Everything the panel learns about the world comes from OS utilities and
//! files owned by someone else. [`run_command`] bounds each utility call with a
//! timeout, and [`best_effort`] / [`best_effort_sync`] turn any failure into a
//! caller-supplied fallback so one broken probe never takes a response down.

use std::fmt::Display;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started (missing binary, permissions).
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program did not finish within its timeout and was killed.
    #[error("`{program}` timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Captured result of a finished command. Output is decoded lossily.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs `program` with `args`, capturing stdout and stderr.
///
/// The child is killed if `timeout` elapses first. A non-zero exit status is
/// not an error here; callers inspect [`CommandOutput::code`].
///
/// # Errors
/// Returns [`CommandError::Spawn`] if the program cannot be started and
/// [`CommandError::Timeout`] if it runs past `timeout`.
pub async fn run_command<I, S>(
    program: &str,
    args: I,
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutput, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?,
        Err(_) => {
            return Err(CommandError::Timeout {
                program: program.to_string(),
                timeout,
            })
        }
    };

    Ok(CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Awaits `op`, returning `fallback` if it fails.
///
/// The failure is logged at debug level under `label`; callers that consider
/// the failure noteworthy log it themselves.
pub async fn best_effort<T, E, F>(label: &str, op: F, fallback: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match op.await {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("{} unavailable, using fallback: {}", label, e);
            fallback
        }
    }
}

/// Synchronous counterpart of [`best_effort`].
pub fn best_effort_sync<T, E, F>(label: &str, op: F, fallback: T) -> T
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    match op() {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("{} unavailable, using fallback: {}", label, e);
            fallback
        }
    }
}
