//! Filesystem bundle store.

use camino::{Utf8Path, Utf8PathBuf};

use bundlegate_utils::{append_line_block, utc_timestamp, write_file_atomic, BundlePaths};
use tracing::debug;

use crate::{BundleState, BundleStatus, StatusCodec, StoreError, YamlCodec};

/// Optional fields attached to a status transition.
#[derive(Debug, Clone, Default)]
pub struct TransitionFields {
    pub workflow_phase: Option<String>,
    pub error_category: Option<String>,
    pub commit_sha: Option<String>,
}

/// Read/write interface to per-task bundle state.
///
/// Call sites depend on this trait, not on the filesystem layout, so
/// locking or other concurrent-access hardening can be added behind it
/// without touching them.
pub trait BundleStore {
    /// Read the status record for `task_id`.
    fn read(&self, task_id: &str) -> Result<BundleStatus, StoreError>;

    /// Apply a status transition and persist the updated record.
    ///
    /// The existing record is read (a missing file starts from a fresh
    /// default), the transition and its side fields are stamped, and the
    /// file is rewritten wholesale. Returns the record as written.
    fn write_transition(
        &self,
        task_id: &str,
        state: BundleState,
        fields: TransitionFields,
    ) -> Result<BundleStatus, StoreError>;
}

/// Bundle store over `.task_bundles/<TASK-id>/bundle_status.yaml`.
pub struct FsBundleStore {
    project_root: Utf8PathBuf,
    codec: Box<dyn StatusCodec + Send + Sync>,
}

impl FsBundleStore {
    /// Store rooted at `project_root`, using the YAML codec.
    #[must_use]
    pub fn new(project_root: impl AsRef<Utf8Path>) -> Self {
        Self::with_codec(project_root, Box::new(YamlCodec))
    }

    /// Store with an explicit codec (see [`crate::MinimalCodec`]).
    #[must_use]
    pub fn with_codec(
        project_root: impl AsRef<Utf8Path>,
        codec: Box<dyn StatusCodec + Send + Sync>,
    ) -> Self {
        Self {
            project_root: project_root.as_ref().to_owned(),
            codec,
        }
    }

    /// Path layout for one task's bundle.
    #[must_use]
    pub fn paths(&self, task_id: &str) -> BundlePaths {
        BundlePaths::new(&self.project_root, task_id)
    }

    /// Create the bundle directory with a fresh `bundling` status record.
    ///
    /// Called once when a task bundle begins. Re-initializing an existing
    /// bundle is an error: the status file is the workflow's forensic
    /// record and must not be clobbered.
    pub fn init(&self, task_id: &str) -> Result<BundleStatus, StoreError> {
        let paths = self.paths(task_id);
        let status_file = paths.status_file();
        if status_file.exists() {
            return Err(StoreError::Io {
                path: status_file.to_string(),
                reason: "bundle already initialized".to_string(),
            });
        }

        let now = utc_timestamp();
        let status = BundleStatus {
            status: BundleState::Bundling,
            workflow_phase: Some("bundling".to_string()),
            created_at: Some(now.clone()),
            last_updated: Some(now),
            ..BundleStatus::default()
        };
        self.persist(&status_file, &status)?;
        Ok(status)
    }

    /// Append one timestamped failure block to the cumulative error log.
    pub fn append_error_log(
        &self,
        task_id: &str,
        category: &str,
        error_message: &str,
    ) -> Result<(), StoreError> {
        let paths = self.paths(task_id);
        let block = format!(
            "{}: {category} validation failed\nError: {error_message}\n---\n",
            utc_timestamp()
        );
        append_line_block(&paths.error_log(), &block).map_err(|e| StoreError::Io {
            path: paths.error_log().to_string(),
            reason: e.to_string(),
        })
    }

    /// Rewrite the remediation feedback document wholesale.
    pub fn write_feedback(&self, task_id: &str, markdown: &str) -> Result<(), StoreError> {
        let paths = self.paths(task_id);
        write_file_atomic(&paths.feedback_file(), markdown).map_err(|e| StoreError::Io {
            path: paths.feedback_file().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the aggregated validation results artifact.
    pub fn write_results(
        &self,
        task_id: &str,
        results: &serde_json::Value,
    ) -> Result<(), StoreError> {
        let paths = self.paths(task_id);
        let content =
            serde_json::to_string_pretty(results).map_err(|e| StoreError::Encode {
                reason: e.to_string(),
            })?;
        write_file_atomic(&paths.results_file(), &content).map_err(|e| StoreError::Io {
            path: paths.results_file().to_string(),
            reason: e.to_string(),
        })
    }

    fn read_or_default(&self, task_id: &str) -> Result<BundleStatus, StoreError> {
        match self.read(task_id) {
            Ok(status) => Ok(status),
            Err(StoreError::NotFound { .. }) => Ok(BundleStatus::default()),
            Err(e) => Err(e),
        }
    }

    fn persist(&self, path: &Utf8Path, status: &BundleStatus) -> Result<(), StoreError> {
        let content = self.codec.encode(status)?;
        write_file_atomic(path, &content).map_err(|e| StoreError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl BundleStore for FsBundleStore {
    fn read(&self, task_id: &str) -> Result<BundleStatus, StoreError> {
        let status_file = self.paths(task_id).status_file();
        if !status_file.exists() {
            return Err(StoreError::NotFound {
                task_id: task_id.to_string(),
            });
        }

        let content =
            std::fs::read_to_string(status_file.as_std_path()).map_err(|e| StoreError::Io {
                path: status_file.to_string(),
                reason: e.to_string(),
            })?;
        self.codec.decode(&content)
    }

    fn write_transition(
        &self,
        task_id: &str,
        state: BundleState,
        fields: TransitionFields,
    ) -> Result<BundleStatus, StoreError> {
        let mut status = self.read_or_default(task_id)?;
        debug!(task_id, from = %status.status, to = %state, "bundle status transition");

        status.status = state;
        status.last_updated = Some(utc_timestamp());

        if let Some(phase) = fields.workflow_phase {
            status.workflow_phase = Some(phase);
        }
        if let Some(category) = fields.error_category {
            status.error_category = Some(category);
        }
        if let Some(sha) = fields.commit_sha {
            status.commit_sha = Some(sha);
        }

        match state {
            BundleState::ValidationStarted => {
                status.validation_started_at = Some(utc_timestamp());
                status.validator_agent_completed = false;
            }
            BundleState::ValidationCompleted => {
                status.validation_completed_at = Some(utc_timestamp());
                status.validator_agent_completed = true;
            }
            _ => {}
        }

        self.persist(&self.paths(task_id).status_file(), &status)?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MinimalCodec;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> (FsBundleStore, Utf8PathBuf) {
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (FsBundleStore::new(&root), root)
    }

    #[test]
    fn test_init_creates_fresh_bundling_record() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);

        let status = store.init("001").unwrap();
        assert_eq!(status.status, BundleState::Bundling);
        assert!(status.created_at.is_some());

        let read_back = store.read("001").unwrap();
        assert_eq!(read_back.status, BundleState::Bundling);
        assert!(!read_back.validator_agent_completed);
    }

    #[test]
    fn test_init_refuses_to_clobber_existing_bundle() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);

        store.init("001").unwrap();
        let err = store.init("001").unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }

    #[test]
    fn test_read_missing_bundle_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);

        let err = store.read("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_validation_started_transition_stamps_fields() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("007").unwrap();

        let status = store
            .write_transition(
                "007",
                BundleState::ValidationStarted,
                TransitionFields {
                    workflow_phase: Some("validation".to_string()),
                    ..TransitionFields::default()
                },
            )
            .unwrap();

        assert_eq!(status.status, BundleState::ValidationStarted);
        assert!(status.validation_started_at.is_some());
        assert!(!status.validator_agent_completed);
        assert_eq!(status.workflow_phase.as_deref(), Some("validation"));
    }

    #[test]
    fn test_validation_completed_sets_agent_flag_and_sha() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("007").unwrap();
        store
            .write_transition(
                "007",
                BundleState::ValidationStarted,
                TransitionFields::default(),
            )
            .unwrap();

        let status = store
            .write_transition(
                "007",
                BundleState::ValidationCompleted,
                TransitionFields {
                    commit_sha: Some("deadbeef".to_string()),
                    ..TransitionFields::default()
                },
            )
            .unwrap();

        assert!(status.validator_agent_completed);
        assert!(status.validation_completed_at.is_some());
        assert_eq!(status.commit_sha.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_failed_transition_records_category_and_preserves_file() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("013").unwrap();

        store
            .write_transition(
                "013",
                BundleState::ValidationFailed,
                TransitionFields {
                    error_category: Some("lint".to_string()),
                    ..TransitionFields::default()
                },
            )
            .unwrap();

        let paths = store.paths("013");
        assert!(paths.status_file().exists());
        let read_back = store.read("013").unwrap();
        assert_eq!(read_back.status, BundleState::ValidationFailed);
        assert_eq!(read_back.error_category.as_deref(), Some("lint"));
    }

    #[test]
    fn test_transition_on_missing_bundle_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);

        // Hooks may have created nothing yet; the engine still records state.
        let status = store
            .write_transition(
                "099",
                BundleState::ValidationStarted,
                TransitionFields::default(),
            )
            .unwrap();
        assert_eq!(status.status, BundleState::ValidationStarted);
        assert!(store.paths("099").status_file().exists());
    }

    #[test]
    fn test_error_log_is_append_only() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("017").unwrap();

        store.append_error_log("017", "test", "assertion failed").unwrap();
        store.append_error_log("017", "lint", "E501 line too long").unwrap();

        let log = std::fs::read_to_string(store.paths("017").error_log().as_std_path()).unwrap();
        assert!(log.contains("test validation failed"));
        assert!(log.contains("lint validation failed"));
        assert_eq!(log.matches("---").count(), 2);
    }

    #[test]
    fn test_feedback_is_rewritten_wholesale() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("017").unwrap();

        store.write_feedback("017", "# First failure\n").unwrap();
        store.write_feedback("017", "# Second failure\n").unwrap();

        let feedback =
            std::fs::read_to_string(store.paths("017").feedback_file().as_std_path()).unwrap();
        assert_eq!(feedback, "# Second failure\n");
    }

    #[test]
    fn test_write_results_pretty_json() {
        let dir = TempDir::new().unwrap();
        let (store, _root) = store_in(&dir);
        store.init("017").unwrap();

        store
            .write_results("017", &serde_json::json!({"testing": {"success": true}}))
            .unwrap();

        let raw =
            std::fs::read_to_string(store.paths("017").results_file().as_std_path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["testing"]["success"], serde_json::json!(true));
    }

    #[test]
    fn test_store_works_with_minimal_codec() {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let store = FsBundleStore::with_codec(&root, Box::new(MinimalCodec));

        store.init("021").unwrap();
        let status = store
            .write_transition(
                "021",
                BundleState::ValidationStarted,
                TransitionFields::default(),
            )
            .unwrap();
        assert_eq!(status.status, BundleState::ValidationStarted);

        let read_back = store.read("021").unwrap();
        assert_eq!(read_back.status, BundleState::ValidationStarted);
    }
}
