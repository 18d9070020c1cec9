//! Commit result model.

use serde::{Deserialize, Serialize};

/// Outcome of a commit attempt.
///
/// `success` and `committed` are distinct: a commit skipped because
/// validation failed is a success that committed nothing, while a commit
/// that git rejected is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommitResult {
    pub success: bool,
    #[serde(default)]
    pub committed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GitCommitResult {
    /// A commit that landed.
    #[must_use]
    pub fn committed(commit_sha: Option<String>) -> Self {
        Self {
            success: true,
            committed: true,
            commit_sha,
            error_message: None,
        }
    }

    /// Deliberately skipped (validation did not pass).
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            success: true,
            committed: false,
            commit_sha: None,
            error_message: Some(reason.into()),
        }
    }

    /// Git rejected or never ran the commit.
    #[must_use]
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            committed: false,
            commit_sha: None,
            error_message: Some(error_message.into()),
        }
    }
}
