//! Git commit automation.
//!
//! Commits validated changes with a `TASK-<id>` commit message. Like the
//! other gate components, git failures are absorbed into a structured
//! [`GitCommitResult`] rather than raised: whether a failed commit sinks
//! the validation is the orchestrator's call.

mod automator;
mod result;

pub use automator::GitAutomator;
pub use result::GitCommitResult;

use std::time::Duration;

/// Timeout for staging, status, and commit operations.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for `git rev-parse HEAD`.
pub const REV_PARSE_TIMEOUT: Duration = Duration::from_secs(10);
