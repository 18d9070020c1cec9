//! Runner error types.

use thiserror::Error;

/// Errors from subprocess execution.
///
/// A tool that runs and exits nonzero is NOT an error here — that is a
/// [`crate::ProcessOutput`] with a nonzero exit code. `RunnerError` covers
/// the cases where no meaningful output exists at all.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program does not exist on the PATH.
    #[error("Program not found: {program}")]
    NotFound { program: String },

    /// The process did not finish within the allotted timeout.
    #[error("Process timed out after {timeout_seconds}s")]
    Timeout { timeout_seconds: u64 },

    /// The process could not be spawned or waited on.
    #[error("Process execution failed: {reason}")]
    ExecutionFailed { reason: String },
}

impl RunnerError {
    /// Whether this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::Timeout { .. })
    }

    /// Whether the program was missing entirely. Callers treat this as
    /// "tool unavailable" rather than a broken run.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, RunnerError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = RunnerError::Timeout {
            timeout_seconds: 300,
        };
        assert_eq!(err.to_string(), "Process timed out after 300s");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_execution_failed_display() {
        let err = RunnerError::ExecutionFailed {
            reason: "spawn failed".to_string(),
        };
        assert!(err.to_string().contains("spawn failed"));
        assert!(!err.is_timeout());
    }
}
