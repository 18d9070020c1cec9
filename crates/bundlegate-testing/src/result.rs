//! Test run result model.

use serde::{Deserialize, Serialize};

/// Outcome record for one test file (or one runner invocation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFileRecord {
    pub file: String,
    pub status: String,
}

/// Result of one test invocation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub success: bool,
    #[serde(default)]
    pub test_results: Vec<TestFileRecord>,
    /// Measured coverage percentage (0–100), when this was a coverage run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<f64>,
    /// Combined stdout+stderr on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub exit_code: i32,
}

impl TestResult {
    /// Successful run over the given files.
    #[must_use]
    pub fn passed(test_results: Vec<TestFileRecord>) -> Self {
        Self {
            success: true,
            test_results,
            coverage_percentage: None,
            error_message: None,
            exit_code: 0,
        }
    }

    /// Failure that never produced a process exit (discovery, spawn, timeout).
    #[must_use]
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            test_results: Vec::new(),
            coverage_percentage: None,
            error_message: Some(error_message.into()),
            exit_code: 0,
        }
    }
}
