//! Validation orchestration engine.
//!
//! Drives the quality gates in their fixed order (testing, linting, type
//! checking, security), fails fast on the first gate that does not pass,
//! and on full success conditionally commits the validated changes. Every
//! run leaves a trail in the task bundle: status transitions in
//! `bundle_status.yaml`, aggregated results in `validation_results.json`,
//! and on failure an appended error log plus a rewritten remediation
//! feedback document.

mod categorize;
mod engine;
mod error;
mod feedback;
mod result;
mod summary;

pub use categorize::categorize_failure;
pub use engine::ValidationEngine;
pub use error::ValidationError;
pub use feedback::generate_failure_feedback;
pub use result::ValidationResult;
pub use summary::create_validation_summary;
