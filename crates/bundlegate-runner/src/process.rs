//! Process output and the runner trait.

use std::time::Duration;

use crate::{CommandSpec, RunnerError};

/// Captured output from a completed process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output bytes.
    pub stdout: Vec<u8>,
    /// Standard error bytes.
    pub stderr: Vec<u8>,
    /// Exit code (`None` if terminated by signal).
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Stdout as a lossy UTF-8 string.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Stderr as a lossy UTF-8 string.
    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Combined stdout + stderr, the form failure messages carry.
    #[must_use]
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout_string();
        combined.push_str(&self.stderr_string());
        combined
    }

    /// True iff the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for synchronous process execution with a bounded timeout.
///
/// Implementations MUST use argv-style APIs only (no shell string
/// evaluation) and MUST return within roughly `timeout` even when the
/// child hangs. Gate components depend on this trait rather than on
/// [`crate::NativeRunner`] directly so tests can substitute stub runners.
pub trait ProcessRunner {
    /// Execute `cmd`, blocking until exit or timeout.
    ///
    /// * `Ok(ProcessOutput)` — the process completed (exit code may be nonzero)
    /// * `Err(RunnerError::NotFound)` — the program is not on the PATH
    /// * `Err(RunnerError::Timeout)` — the process exceeded `timeout`
    /// * `Err(RunnerError::ExecutionFailed)` — spawn/wait failed
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError>;
}
