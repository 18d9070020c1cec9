//! CLI exit codes.
//!
//! Library code never calls `process::exit`; the CLI maps errors to one
//! of these codes at the very end of `run()`.

/// Process exit codes for the bundlegate CLI.
///
/// | Code | Meaning |
/// |------|---------|
/// | 0 | Validation succeeded |
/// | 1 | Unexpected internal error |
/// | 2 | Configuration error (missing/unparseable config, bad arguments) |
/// | 3 | Validation failed (a quality gate did not pass) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Error,
    ConfigError,
    ValidationFailed,
}

impl ExitCode {
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::Error => 1,
            ExitCode::ConfigError => 2,
            ExitCode::ValidationFailed => 3,
        }
    }
}

impl From<crate::types::FailureCategory> for ExitCode {
    fn from(category: crate::types::FailureCategory) -> Self {
        use crate::types::FailureCategory;
        match category {
            FailureCategory::Config => ExitCode::ConfigError,
            FailureCategory::System | FailureCategory::Unknown => ExitCode::Error,
            _ => ExitCode::ValidationFailed,
        }
    }
}
