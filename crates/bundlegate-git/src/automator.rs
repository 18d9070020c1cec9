//! Git automator.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use bundlegate_runner::{CommandSpec, NativeRunner, ProcessRunner};

use crate::{GitCommitResult, GIT_TIMEOUT, REV_PARSE_TIMEOUT};

/// Footer appended to every automated commit message.
const COMMIT_FOOTER: &str = "Committed by bundlegate after all quality gates passed";

/// Stages and commits validated changes in the project repository.
pub struct GitAutomator {
    project_root: Utf8PathBuf,
    runner: Box<dyn ProcessRunner + Send + Sync>,
}

impl GitAutomator {
    /// Automator over `project_root`, invoking git natively.
    #[must_use]
    pub fn new(project_root: impl AsRef<Utf8Path>) -> Self {
        Self::with_runner(project_root, Box::new(NativeRunner::new()))
    }

    /// Automator with an injected process runner (used by tests).
    #[must_use]
    pub fn with_runner(
        project_root: impl AsRef<Utf8Path>,
        runner: Box<dyn ProcessRunner + Send + Sync>,
    ) -> Self {
        Self {
            project_root: project_root.as_ref().to_owned(),
            runner,
        }
    }

    /// Whether the working tree has no staged or unstaged changes.
    /// Any git failure counts as "not clean".
    #[must_use]
    pub fn is_working_tree_clean(&self) -> bool {
        let cmd = self.git(["status", "--porcelain"]);
        match self.runner.run(&cmd, GIT_TIMEOUT) {
            Ok(output) => output.success() && output.stdout_string().trim().is_empty(),
            Err(e) => {
                warn!(error = %e, "git status failed, treating tree as dirty");
                false
            }
        }
    }

    /// Stage everything and commit as `TASK-<id>: <description>`, then
    /// resolve the new HEAD. A failed `rev-parse` leaves the sha unset but
    /// does not undo the commit's success.
    pub fn commit_validated_changes(&self, task_id: &str, description: &str) -> GitCommitResult {
        let stage = self.git(["add", "."]);
        match self.runner.run(&stage, GIT_TIMEOUT) {
            Ok(output) if output.success() => {}
            Ok(output) => {
                return GitCommitResult::failed(format!(
                    "Git staging failed: {}",
                    non_empty_or(output.stderr_string(), output.stdout_string())
                ));
            }
            Err(e) => {
                return GitCommitResult::failed(format!("Unexpected error during commit: {e}"))
            }
        }

        let message = format!("TASK-{task_id}: {description}\n\n{COMMIT_FOOTER}");
        let commit = self.git(["commit", "-m", &message]);
        match self.runner.run(&commit, GIT_TIMEOUT) {
            Ok(output) if output.success() => {
                debug!(task_id, "commit created");
                GitCommitResult::committed(self.head_sha())
            }
            Ok(output) => GitCommitResult::failed(non_empty_or(
                output.stderr_string(),
                output.stdout_string(),
            )),
            Err(e) => GitCommitResult::failed(format!("Unexpected error during commit: {e}")),
        }
    }

    /// Commit only when validation passed. Skipping the commit because
    /// validation failed is success=true/committed=false, never an error.
    pub fn commit_on_validation_success(
        &self,
        validation_passed: bool,
        task_id: &str,
        description: &str,
    ) -> GitCommitResult {
        if !validation_passed {
            return GitCommitResult::skipped("Validation failed - no commit created");
        }
        self.commit_validated_changes(task_id, description)
    }

    fn head_sha(&self) -> Option<String> {
        let cmd = self.git(["rev-parse", "HEAD"]);
        match self.runner.run(&cmd, REV_PARSE_TIMEOUT) {
            Ok(output) if output.success() => Some(output.stdout_string().trim().to_string()),
            _ => None,
        }
    }

    fn git<const N: usize>(&self, args: [&str; N]) -> CommandSpec {
        CommandSpec::new("git")
            .args(args)
            .cwd(self.project_root.as_std_path())
    }
}

fn non_empty_or(primary: String, fallback: String) -> String {
    if primary.trim().is_empty() {
        fallback
    } else {
        primary
    }
}
