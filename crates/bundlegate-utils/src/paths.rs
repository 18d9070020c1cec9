//! Bundle directory layout.
//!
//! Every task owns one directory under `.task_bundles/` at the project
//! root. The validation engine and the external lifecycle hooks agree on
//! the file names below; nothing else may invent paths inside a bundle.

use camino::{Utf8Path, Utf8PathBuf};

/// Directory under the project root that holds all task bundles.
pub const BUNDLES_DIR: &str = ".task_bundles";

/// Prefix used in commit messages and bundle naming (`TASK-<id>`).
pub const TASK_PREFIX: &str = "TASK";

/// Resolved paths for one task's bundle directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    project_root: Utf8PathBuf,
    bundle_dir: Utf8PathBuf,
}

impl BundlePaths {
    /// Lay out the bundle paths for `task_id` under `project_root`.
    #[must_use]
    pub fn new(project_root: impl AsRef<Utf8Path>, task_id: &str) -> Self {
        let project_root = project_root.as_ref().to_owned();
        let bundle_dir = project_root
            .join(BUNDLES_DIR)
            .join(format!("{TASK_PREFIX}-{task_id}"));
        Self {
            project_root,
            bundle_dir,
        }
    }

    /// Reconstruct the layout from an existing bundle directory.
    ///
    /// The project root is two levels up from the bundle directory
    /// (`<root>/.task_bundles/TASK-<id>`).
    #[must_use]
    pub fn from_bundle_dir(bundle_dir: impl AsRef<Utf8Path>) -> Self {
        let bundle_dir = bundle_dir.as_ref().to_owned();
        let project_root = bundle_dir
            .parent()
            .and_then(Utf8Path::parent)
            .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_owned);
        Self {
            project_root,
            bundle_dir,
        }
    }

    #[must_use]
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    #[must_use]
    pub fn bundle_dir(&self) -> &Utf8Path {
        &self.bundle_dir
    }

    /// Structured status record, rewritten wholesale on every transition.
    #[must_use]
    pub fn status_file(&self) -> Utf8PathBuf {
        self.bundle_dir.join("bundle_status.yaml")
    }

    /// Structured dump of all phase results, written on successful completion.
    #[must_use]
    pub fn results_file(&self) -> Utf8PathBuf {
        self.bundle_dir.join("validation_results.json")
    }

    /// Append-only plaintext log, one timestamped block per failure.
    #[must_use]
    pub fn error_log(&self) -> Utf8PathBuf {
        self.bundle_dir.join("validation_error.log")
    }

    /// Remediation guidance, rewritten wholesale on each failure.
    #[must_use]
    pub fn feedback_file(&self) -> Utf8PathBuf {
        self.bundle_dir.join("validation_failure_feedback.md")
    }
}
