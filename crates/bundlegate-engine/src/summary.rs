//! Human-readable validation summary.

use crate::{ValidationError, ValidationResult};

/// Render a short pass/fail banner for a finished validation run.
#[must_use]
pub fn create_validation_summary(outcome: &Result<ValidationResult, ValidationError>) -> String {
    match outcome {
        Ok(result) => format!(
            "# Validation Summary: PASSED\n\n\
             All validation checks passed successfully!\n\n\
             **Commit SHA:** {}\n\
             **Validation Time:** {:.2} seconds\n\n\
             ## Checks Performed\n\
             - Test execution and coverage\n\
             - Code style and linting\n\
             - Type checking\n\
             - Security scanning\n\
             - Git commit automation\n\n\
             Generated code meets all quality standards and has been committed to the repository.\n",
            result.commit_sha.as_deref().unwrap_or("N/A"),
            result.validation_time_seconds,
        ),
        Err(err) => format!(
            "# Validation Summary: FAILED\n\n\
             Validation failed. Please review the error details and fix the issues.\n\n\
             **Error Category:** {}\n\
             **Error Message:** {}\n\n\
             Check the validation failure feedback for detailed remediation guidance.\n",
            err.category, err.message,
        ),
    }
}
