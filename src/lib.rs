//! bundlegate — quality-gate orchestrator for task bundles.
//!
//! A task bundle is a per-task working directory under `.task_bundles/`
//! that records the task's progress through the workflow. bundlegate runs
//! the quality gates for a task — tests, linting, type checking, security
//! scanning — in a fixed fail-fast order, persists every outcome into the
//! bundle, and commits the validated changes when (and only when) every
//! gate passes.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Initialize a task bundle
//! bundlegate init 017
//!
//! # Run the full validation pipeline
//! bundlegate validate 017 --description "Implement retry logic"
//!
//! # Inspect the bundle status record
//! bundlegate status 017
//! ```
//!
//! The library is split into focused crates; this root crate re-exports
//! the public surface and hosts the CLI.

pub mod cli;

pub use bundlegate_analysis::{
    get_remediation_guidance, StaticAnalysisResult, StaticAnalyzer, ToolOutcome, ToolStatus,
};
pub use bundlegate_config::{load_quality_config, ConfigError, ParserBackend, QualityConfig};
pub use bundlegate_engine::{
    categorize_failure, create_validation_summary, ValidationEngine, ValidationError,
    ValidationResult,
};
pub use bundlegate_git::{GitAutomator, GitCommitResult};
pub use bundlegate_runner::{CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError};
pub use bundlegate_store::{BundleState, BundleStatus, BundleStore, FsBundleStore};
pub use bundlegate_testing::{TestExecutor, TestResult};
pub use bundlegate_utils::{BundlePaths, ExitCode, FailureCategory, PhaseId};
