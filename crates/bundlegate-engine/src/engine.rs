//! The validation engine.

use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{json, Value};
use tracing::{info, warn};

use bundlegate_analysis::StaticAnalyzer;
use bundlegate_config::QualityConfig;
use bundlegate_git::GitAutomator;
use bundlegate_store::{BundleState, BundleStore, FsBundleStore, TransitionFields};
use bundlegate_testing::TestExecutor;
use bundlegate_utils::{utc_timestamp, PhaseId};

use crate::{generate_failure_feedback, ValidationError, ValidationResult};

/// Outcome of one pipeline phase, before fail-fast is applied.
struct PhaseOutcome {
    success: bool,
    detail: Option<String>,
    value: Value,
}

/// Coordinates the quality gates for one project.
pub struct ValidationEngine {
    config: QualityConfig,
    executor: TestExecutor,
    analyzer: StaticAnalyzer,
    git: GitAutomator,
    store: FsBundleStore,
}

impl ValidationEngine {
    /// Engine over `project_root` with natively-invoked tools.
    #[must_use]
    pub fn new(config: QualityConfig, project_root: impl AsRef<Utf8Path>) -> Self {
        let root: Utf8PathBuf = project_root.as_ref().to_owned();
        Self {
            executor: TestExecutor::new(&root),
            analyzer: StaticAnalyzer::new(&root),
            git: GitAutomator::new(&root),
            store: FsBundleStore::new(&root),
            config,
        }
    }

    /// Engine with injected gate components (used by tests).
    #[must_use]
    pub fn with_components(
        config: QualityConfig,
        project_root: impl AsRef<Utf8Path>,
        executor: TestExecutor,
        analyzer: StaticAnalyzer,
        git: GitAutomator,
    ) -> Self {
        Self {
            executor,
            analyzer,
            git,
            store: FsBundleStore::new(project_root),
            config,
        }
    }

    /// Run the full validation pipeline for `task_id`.
    ///
    /// Phases run in fixed order and the first failing gate aborts the
    /// rest. On any failure — gate or internal — the bundle is preserved
    /// with a failed status, an appended error log entry, and a rewritten
    /// feedback document, and the error is returned to the caller.
    pub fn run_full_validation(
        &self,
        task_id: &str,
        description: &str,
    ) -> Result<ValidationResult, ValidationError> {
        let start = Instant::now();
        info!(task_id, "starting validation");

        match self.run_pipeline(task_id, description) {
            Ok((commit_sha, results)) => {
                let elapsed = start.elapsed().as_secs_f64();
                info!(task_id, elapsed, "validation passed");
                Ok(ValidationResult::passed(commit_sha, elapsed, results))
            }
            Err(err) => {
                warn!(task_id, category = %err.category, "validation failed");
                self.handle_validation_failure(task_id, &err);
                Err(err)
            }
        }
    }

    fn run_pipeline(
        &self,
        task_id: &str,
        description: &str,
    ) -> Result<(Option<String>, Value), ValidationError> {
        self.store
            .write_transition(
                task_id,
                BundleState::ValidationStarted,
                TransitionFields {
                    workflow_phase: Some("validation".to_string()),
                    ..TransitionFields::default()
                },
            )
            .map_err(|e| ValidationError::system(e.to_string()))?;

        let mut results = serde_json::Map::new();

        for phase in PhaseId::gates() {
            let Some(outcome) = self.run_phase(phase, task_id) else {
                continue; // phase disabled in config
            };
            results.insert(phase.to_string(), outcome.value);
            if !outcome.success {
                return Err(ValidationError::gate(phase, outcome.detail));
            }
            info!(task_id, phase = %phase, "gate passed");
        }

        // Committing requires both flags: `enabled` switches git
        // integration off wholesale, `auto_commit` governs only the
        // conditional commit step.
        let mut commit_sha = None;
        if self.config.git_integration.enabled && self.config.git_integration.auto_commit {
            let commit = self.git.commit_on_validation_success(true, task_id, description);
            if !commit.success {
                // All gates passed; a rejected commit is recorded but does
                // not invalidate the run.
                warn!(
                    task_id,
                    error = commit.error_message.as_deref().unwrap_or("unknown"),
                    "commit failed after successful validation"
                );
            }
            commit_sha = commit.commit_sha.clone();
            results.insert(PhaseId::GitCommit.to_string(), json!(commit));
        }

        self.store
            .write_transition(
                task_id,
                BundleState::ValidationCompleted,
                TransitionFields {
                    commit_sha: commit_sha.clone(),
                    ..TransitionFields::default()
                },
            )
            .map_err(|e| ValidationError::system(e.to_string()))?;

        let results = Value::Object(results);
        self.store
            .write_results(task_id, &results)
            .map_err(|e| ValidationError::system(e.to_string()))?;

        Ok((commit_sha, results))
    }

    fn run_phase(&self, phase: PhaseId, task_id: &str) -> Option<PhaseOutcome> {
        match phase {
            PhaseId::Testing => self
                .config
                .testing
                .enabled
                .then(|| self.run_testing_phase(task_id)),
            PhaseId::Linting => self.config.linting.enabled.then(|| {
                let result = self.analyzer.run_linting(&self.config.linting.tools);
                PhaseOutcome {
                    success: result.success,
                    detail: result.error_message.clone(),
                    value: json!(result),
                }
            }),
            PhaseId::TypeChecking => self.config.type_checking.enabled.then(|| {
                let result = self.analyzer.run_type_checking(&self.config.type_checking.tool);
                PhaseOutcome {
                    success: result.success,
                    detail: result.error_message.clone(),
                    value: json!(result),
                }
            }),
            PhaseId::Security => self.config.security.enabled.then(|| {
                let result = self
                    .analyzer
                    .run_security_scanning(&self.config.security.tools);
                PhaseOutcome {
                    success: result.success,
                    detail: result.error_message.clone(),
                    value: json!(result),
                }
            }),
            PhaseId::GitCommit => None,
        }
    }

    fn run_testing_phase(&self, task_id: &str) -> PhaseOutcome {
        let generated = self.executor.run_generated_tests(task_id);
        let regression = self.executor.run_regression_tests();

        let threshold = self.config.testing.coverage_threshold;
        let coverage = (threshold > 0).then(|| self.executor.check_coverage_threshold(threshold));

        let success = generated.success
            && regression.success
            && coverage.as_ref().map_or(true, |c| c.success);
        let detail = generated
            .error_message
            .clone()
            .or_else(|| regression.error_message.clone())
            .or_else(|| coverage.as_ref().and_then(|c| c.error_message.clone()));

        PhaseOutcome {
            success,
            detail,
            value: json!({
                "generated_tests": generated,
                "regression_tests": regression,
                "coverage": coverage,
            }),
        }
    }

    /// Preserve the bundle and record the failure. Best-effort: a broken
    /// store must not mask the validation error itself.
    pub fn handle_validation_failure(&self, task_id: &str, error: &ValidationError) {
        let category = error.category.to_string();

        if let Err(e) = self.store.write_transition(
            task_id,
            BundleState::ValidationFailed,
            TransitionFields {
                error_category: Some(category.clone()),
                ..TransitionFields::default()
            },
        ) {
            warn!(task_id, error = %e, "failed to record failed status");
        }

        if let Err(e) = self
            .store
            .append_error_log(task_id, &category, &error.message)
        {
            warn!(task_id, error = %e, "failed to append error log");
        }

        let feedback = generate_failure_feedback(error.category, &error.message, &utc_timestamp());
        if let Err(e) = self.store.write_feedback(task_id, &feedback) {
            warn!(task_id, error = %e, "failed to write feedback document");
        }
    }
}
