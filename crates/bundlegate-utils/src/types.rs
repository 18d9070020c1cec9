//! Shared identifier types used across the bundlegate crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One gate in the validation pipeline.
///
/// The pipeline order is fixed: testing, linting, type checking, security
/// scanning, and finally the (conditional) git commit step. `GitCommit` is
/// not a gate — its failure never invalidates an already-passed run — but
/// it shares the phase identifier space so results can be keyed uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Testing,
    Linting,
    TypeChecking,
    Security,
    GitCommit,
}

impl PhaseId {
    /// The quality gates, in execution order. Excludes `GitCommit`.
    #[must_use]
    pub const fn gates() -> [PhaseId; 4] {
        [
            PhaseId::Testing,
            PhaseId::Linting,
            PhaseId::TypeChecking,
            PhaseId::Security,
        ]
    }
}

/// Failure taxonomy for validation runs.
///
/// `System` covers unexpected internal errors; `Unknown` is the fallback
/// when a free-text failure cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FailureCategory {
    Config,
    Test,
    Lint,
    Type,
    Security,
    System,
    Unknown,
}

impl FailureCategory {
    /// Category for a failing gate.
    #[must_use]
    pub const fn for_phase(phase: PhaseId) -> Self {
        match phase {
            PhaseId::Testing => FailureCategory::Test,
            PhaseId::Linting => FailureCategory::Lint,
            PhaseId::TypeChecking => FailureCategory::Type,
            PhaseId::Security => FailureCategory::Security,
            PhaseId::GitCommit => FailureCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_phase_id_round_trips_through_strings() {
        assert_eq!(PhaseId::TypeChecking.to_string(), "type_checking");
        assert_eq!(PhaseId::from_str("security").unwrap(), PhaseId::Security);
        assert_eq!(
            PhaseId::from_str("type_checking").unwrap(),
            PhaseId::TypeChecking
        );
    }

    #[test]
    fn test_gates_order_is_fixed() {
        let gates = PhaseId::gates();
        assert_eq!(
            gates,
            [
                PhaseId::Testing,
                PhaseId::Linting,
                PhaseId::TypeChecking,
                PhaseId::Security,
            ]
        );
    }

    #[test]
    fn test_failure_category_display_is_lowercase() {
        assert_eq!(FailureCategory::Lint.to_string(), "lint");
        assert_eq!(FailureCategory::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_failure_category_for_phase() {
        assert_eq!(
            FailureCategory::for_phase(PhaseId::Testing),
            FailureCategory::Test
        );
        assert_eq!(
            FailureCategory::for_phase(PhaseId::TypeChecking),
            FailureCategory::Type
        );
    }

    #[test]
    fn test_failure_category_serde_lowercase() {
        let json = serde_json::to_string(&FailureCategory::Security).unwrap();
        assert_eq!(json, "\"security\"");
    }
}
