//! The per-task bundle status record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Workflow state of a task bundle.
///
/// Within one validation run the status moves monotonically forward:
/// `validation_started` → `validation_completed` or `validation_failed`,
/// never backwards. The earlier states belong to the bundler/coder side
/// of the workflow; `completed`/`failed` are terminal for the whole task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BundleState {
    #[default]
    Bundling,
    Coding,
    Validating,
    ValidationStarted,
    ValidationCompleted,
    ValidationFailed,
    Completed,
    Failed,
}

/// Persistent status record for one task bundle.
///
/// Rewritten wholesale on every transition. Unknown fields written by
/// other workflow participants are preserved round-trip via `extra`.
/// The file is never deleted, even after failure — it is the forensic
/// record an operator inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BundleStatus {
    pub status: BundleState,

    /// Coarse workflow phase label the lifecycle hooks display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_phase: Option<String>,

    /// ISO-8601 UTC timestamp of the last write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_completed_at: Option<String>,

    #[serde(default)]
    pub bundler_agent_completed: bool,

    #[serde(default)]
    pub coder_agent_completed: bool,

    #[serde(default)]
    pub validator_agent_completed: bool,

    /// Failure category of the last failed validation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_category: Option<String>,

    /// Commit created by a successful validation run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,

    /// Fields owned by other workflow participants; preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
