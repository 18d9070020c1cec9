//! Store error types.

use thiserror::Error;

/// Errors from reading or writing bundle state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No bundle found for task {task_id}")]
    NotFound { task_id: String },

    #[error("Failed to access bundle file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to decode bundle status: {reason}")]
    Decode { reason: String },

    #[error("Failed to encode bundle status: {reason}")]
    Encode { reason: String },
}
