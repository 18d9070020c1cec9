//! Static analysis gates for bundlegate.
//!
//! Wraps the Python quality toolchain (flake8, black, isort, pylint, mypy,
//! pyright, bandit, safety) behind a tool registry of tagged enums. Each
//! tool invocation is absorbed into a [`ToolOutcome`] — a missing binary is
//! a [`ToolStatus::Skipped`], a hung one a [`ToolStatus::Error`] — and the
//! per-gate aggregate lands in a [`StaticAnalysisResult`].

mod analyzer;
mod guidance;
mod outcome;
mod tools;

pub use analyzer::StaticAnalyzer;
pub use guidance::get_remediation_guidance;
pub use outcome::{StaticAnalysisResult, ToolOutcome, ToolStatus, Violation};
pub use tools::{LintTool, SecurityTool, TypeChecker};

use std::time::Duration;

/// Timeout for lint and security tools.
pub const LINT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for whole-program analyzers (pylint, type checkers).
pub const DEEP_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(180);
