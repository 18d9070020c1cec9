//! Typed validation failure.

use thiserror::Error;

use bundlegate_utils::{FailureCategory, PhaseId};

/// A validation run that did not pass.
///
/// Carries the failure taxonomy category alongside the human-readable
/// message so callers can branch on the category without re-parsing text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub category: FailureCategory,
    pub message: String,
}

impl ValidationError {
    /// Failure of a specific gate, with the gate's detail attached when
    /// the gate produced one.
    #[must_use]
    pub fn gate(phase: PhaseId, detail: Option<String>) -> Self {
        let label = match phase {
            PhaseId::Testing => "Test",
            PhaseId::Linting => "Linting",
            PhaseId::TypeChecking => "Type checking",
            PhaseId::Security => "Security",
            PhaseId::GitCommit => "Git commit",
        };
        let message = match detail {
            Some(detail) => format!("{label} validation failed: {detail}"),
            None => format!("{label} validation failed"),
        };
        Self {
            category: FailureCategory::for_phase(phase),
            message,
        }
    }

    /// Unexpected internal error (store I/O and the like).
    #[must_use]
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            category: FailureCategory::System,
            message: format!("Validation system error: {}", message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_failure_carries_phase_category() {
        let err = ValidationError::gate(PhaseId::Linting, None);
        assert_eq!(err.category, FailureCategory::Lint);
        assert_eq!(err.to_string(), "Linting validation failed");
    }

    #[test]
    fn test_gate_failure_appends_detail() {
        let err = ValidationError::gate(
            PhaseId::Testing,
            Some("No test files found for execution".to_string()),
        );
        assert_eq!(err.category, FailureCategory::Test);
        assert!(err.message.ends_with("No test files found for execution"));
    }

    #[test]
    fn test_system_failure_is_wrapped() {
        let err = ValidationError::system("disk full");
        assert_eq!(err.category, FailureCategory::System);
        assert_eq!(err.to_string(), "Validation system error: disk full");
    }
}
