//! Test execution for bundlegate.
//!
//! Runs task-scoped and full-regression Python test suites and enforces
//! the coverage gate. All tool invocations go through
//! [`bundlegate_runner::ProcessRunner`], so every failure mode a test run
//! can hit — nonzero exit, missing runner binary, timeout — is absorbed
//! into a structured [`TestResult`] rather than an error: the orchestrator
//! decides what a failed gate means, not this crate.

mod discover;
mod executor;
mod result;

pub use executor::TestExecutor;
pub use result::{TestFileRecord, TestResult};

use std::time::Duration;

/// Timeout for a task-scoped test run.
pub const GENERATED_TESTS_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for a full regression run.
pub const REGRESSION_TESTS_TIMEOUT: Duration = Duration::from_secs(600);

/// Timeout for the instrumented coverage run.
pub const COVERAGE_TIMEOUT: Duration = Duration::from_secs(300);
