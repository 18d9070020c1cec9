//! Aggregate validation result.

use serde::{Deserialize, Serialize};

/// Outcome of a full validation run that reached the end of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    pub message: String,
    /// Commit created by the conditional commit step, if one landed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    /// Wall-clock duration of the run.
    pub validation_time_seconds: f64,
    /// Per-phase result payloads, keyed by phase id.
    #[serde(default)]
    pub results: serde_json::Value,
}

impl ValidationResult {
    #[must_use]
    pub fn passed(
        commit_sha: Option<String>,
        validation_time_seconds: f64,
        results: serde_json::Value,
    ) -> Self {
        Self {
            success: true,
            message: "All validation checks passed".to_string(),
            commit_sha,
            validation_time_seconds,
            results,
        }
    }
}
