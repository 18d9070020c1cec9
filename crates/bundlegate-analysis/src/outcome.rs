//! Analysis outcome model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a single tool invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// Tool ran and found nothing.
    Passed,
    /// Tool ran and reported findings.
    Failed,
    /// Tool was not available or not supported; not held against the gate.
    Skipped,
    /// Tool could not produce a verdict (timeout, broken output).
    Error,
}

/// One finding from a lint tool, tagged with the tool that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub tool: String,
    pub message: String,
}

/// Result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub status: ToolStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    /// Raw findings from scanners that report structured JSON (bandit).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<serde_json::Value>,
}

impl ToolOutcome {
    #[must_use]
    pub fn passed(message: impl Into<String>) -> Self {
        Self::with_status(ToolStatus::Passed, message)
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::with_status(ToolStatus::Failed, message)
    }

    #[must_use]
    pub fn skipped(message: impl Into<String>) -> Self {
        Self::with_status(ToolStatus::Skipped, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_status(ToolStatus::Error, message)
    }

    fn with_status(status: ToolStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            violations: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Whether this outcome counts against the gate. Skipped tools do not:
    /// an absent linter must not fail a project that never installed it.
    #[must_use]
    pub fn blocks_gate(&self) -> bool {
        matches!(self.status, ToolStatus::Failed | ToolStatus::Error)
    }
}

/// Aggregate result of one static-analysis gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticAnalysisResult {
    pub success: bool,
    #[serde(default)]
    pub tool_results: BTreeMap<String, ToolOutcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_issues: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StaticAnalysisResult {
    /// Failure with no per-tool breakdown (e.g. unsupported type checker).
    #[must_use]
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            tool_results: BTreeMap::new(),
            violations: Vec::new(),
            security_issues: Vec::new(),
            error_message: Some(error_message.into()),
        }
    }
}
