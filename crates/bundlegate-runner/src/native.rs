//! Native process runner.

use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};

/// Process runner backed by `std::process::Command`.
///
/// Spawns the child with piped stdout/stderr and a null stdin, then waits
/// on a dedicated thread so the caller can bound the wait with
/// `recv_timeout`. On timeout the child is killed (SIGKILL on unix,
/// `TerminateProcess` on windows) before the timeout error is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunnerError::NotFound {
                    program: cmd.program.to_string_lossy().to_string(),
                }
            } else {
                RunnerError::ExecutionFailed {
                    reason: format!(
                        "Failed to spawn process '{}': {e}",
                        cmd.program.to_string_lossy()
                    ),
                }
            }
        })?;

        let child_id = child.id();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        match rx.recv_timeout(timeout) {
            Ok(output_result) => {
                let _ = handle.join();

                let output = output_result.map_err(|e| RunnerError::ExecutionFailed {
                    reason: format!("Failed to wait for process: {e}"),
                })?;

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                ))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                terminate_process(child_id);
                let _ = handle.join();

                Err(RunnerError::Timeout {
                    timeout_seconds: timeout.as_secs(),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::ExecutionFailed {
                reason: "Process monitoring thread terminated unexpectedly".to_string(),
            }),
        }
    }
}

/// Kill a process by PID after a timeout.
fn terminate_process(pid: u32) {
    #[cfg(unix)]
    {
        // SAFETY: kill(2) with a PID we just spawned; worst case the PID is
        // already gone and the call is a harmless ESRCH.
        unsafe {
            libc::kill(pid as i32, libc::SIGKILL);
        }
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{
            OpenProcess, TerminateProcess, PROCESS_TERMINATE,
        };

        unsafe {
            if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                let _ = TerminateProcess(handle, 1);
                let _ = CloseHandle(handle);
            }
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = pid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_command_succeeds() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("echo").arg("hello world");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(output.success());
        assert!(output.stdout_string().contains("hello world"));
    }

    #[test]
    fn test_nonexistent_command_reports_not_found() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("bundlegate_no_such_binary_54321");

        let result = runner.run(&cmd, Duration::from_secs(10));
        match result {
            Err(RunnerError::NotFound { program }) => {
                assert_eq!(program, "bundlegate_no_such_binary_54321");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_propagates() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sh").arg("-c").arg("exit 42");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(42));
    }

    #[test]
    #[cfg(unix)]
    fn test_stderr_is_captured() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo 'error message' >&2");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        assert!(output.stderr_string().contains("error message"));
    }

    #[test]
    #[cfg(unix)]
    fn test_hanging_process_times_out() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("sleep").arg("30");

        let result = runner.run(&cmd, Duration::from_millis(200));
        match result {
            Err(RunnerError::Timeout { .. }) => {}
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_shell_metacharacters_not_interpreted() {
        let runner = NativeRunner::new();
        let cmd = CommandSpec::new("echo").arg("$PATH");

        let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
        // Literal "$PATH", not the expanded variable.
        assert!(output.stdout_string().contains("$PATH"));
    }
}
