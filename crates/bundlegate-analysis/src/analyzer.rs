//! Static analyzer driving the lint, type-checking, and security gates.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use bundlegate_runner::{CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError};

use crate::outcome::{StaticAnalysisResult, ToolOutcome, ToolStatus, Violation};
use crate::tools::{LintTool, SecurityTool, TypeChecker};
use crate::{DEEP_ANALYSIS_TIMEOUT, LINT_TIMEOUT};

/// Runs configured analysis tools against the project root.
pub struct StaticAnalyzer {
    project_root: Utf8PathBuf,
    runner: Box<dyn ProcessRunner + Send + Sync>,
}

impl StaticAnalyzer {
    /// Analyzer over `project_root`, invoking tools natively.
    #[must_use]
    pub fn new(project_root: impl AsRef<Utf8Path>) -> Self {
        Self::with_runner(project_root, Box::new(NativeRunner::new()))
    }

    /// Analyzer with an injected process runner (used by tests).
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

    /// Run the configured lint tools in order.
    ///
    /// A tool name the registry does not know is Skipped, as is a known
    /// tool whose binary is absent. Only Failed and Error outcomes fail
    /// the gate.
    pub fn run_linting(&self, tools: &[String]) -> StaticAnalysisResult {
        let mut result = StaticAnalysisResult {
            success: true,
            tool_results: Default::default(),
            violations: Vec::new(),
            security_issues: Vec::new(),
            error_message: None,
        };

        for name in tools {
            let outcome = match name.parse::<LintTool>() {
                Ok(tool) => self.run_lint_tool(tool),
                Err(_) => ToolOutcome::skipped(format!("Unknown linting tool: {name}")),
            };
            debug!(tool = %name, status = ?outcome.status, "lint tool finished");

            if outcome.blocks_gate() {
                result.success = false;
            }
            result.violations.extend(outcome.violations.iter().cloned());
            result.tool_results.insert(name.clone(), outcome);
        }

        if !result.success {
            result.error_message = Some("Linting violations found".to_string());
        }
        result
    }

    /// Run exactly one type checker. Unknown names are a hard failure:
    /// type checking is a single-tool gate and a typo in the config must
    /// not silently pass it.
    pub fn run_type_checking(&self, tool: &str) -> StaticAnalysisResult {
        let Ok(checker) = tool.parse::<TypeChecker>() else {
            return StaticAnalysisResult::failed(format!("Unknown type checker: {tool}"));
        };

        let outcome = self.run_type_checker(checker);
        debug!(tool = %tool, status = ?outcome.status, "type checker finished");

        let success = outcome.status == ToolStatus::Passed;
        let error_message = if success {
            None
        } else {
            Some(outcome.message.clone())
        };

        let mut result = StaticAnalysisResult {
            success,
            tool_results: Default::default(),
            violations: Vec::new(),
            security_issues: Vec::new(),
            error_message,
        };
        result.tool_results.insert(tool.to_string(), outcome);
        result
    }

    /// Run the configured security scanners in order.
    pub fn run_security_scanning(&self, tools: &[String]) -> StaticAnalysisResult {
        let mut result = StaticAnalysisResult {
            success: true,
            tool_results: Default::default(),
            violations: Vec::new(),
            security_issues: Vec::new(),
            error_message: None,
        };

        for name in tools {
            let outcome = match name.parse::<SecurityTool>() {
                Ok(tool) => self.run_security_tool(tool),
                Err(_) => ToolOutcome::skipped(format!("Unknown security tool: {name}")),
            };
            debug!(tool = %name, status = ?outcome.status, "security tool finished");

            if outcome.blocks_gate() {
                result.success = false;
            }
            result
                .security_issues
                .extend(outcome.issues.iter().cloned());
            result.tool_results.insert(name.clone(), outcome);
        }

        if !result.success {
            result.error_message = Some("Security issues found".to_string());
        }
        result
    }

    fn run_lint_tool(&self, tool: LintTool) -> ToolOutcome {
        let (cmd, timeout) = match tool {
            LintTool::Flake8 => (
                CommandSpec::new(tool.binary()).args(["src/", "tests/"]),
                LINT_TIMEOUT,
            ),
            LintTool::Black => (
                CommandSpec::new(tool.binary()).args(["--check", "src/", "tests/"]),
                LINT_TIMEOUT,
            ),
            LintTool::Isort => (
                CommandSpec::new(tool.binary()).args(["--check-only", "src/", "tests/"]),
                LINT_TIMEOUT,
            ),
            LintTool::Pylint => (
                CommandSpec::new(tool.binary()).arg("src/"),
                DEEP_ANALYSIS_TIMEOUT,
            ),
        };
        let cmd = cmd.cwd(self.project_root.as_std_path());

        let output = match self.runner.run(&cmd, timeout) {
            Ok(output) => output,
            Err(e) => return absorb_runner_error(tool.binary(), &e),
        };

        match tool {
            LintTool::Flake8 => flake8_outcome(&output),
            LintTool::Black => pass_fail_outcome(
                &output,
                "Code formatting is correct",
                "Code formatting issues found".to_string(),
            ),
            LintTool::Isort => pass_fail_outcome(
                &output,
                "Import sorting is correct",
                "Import sorting issues found".to_string(),
            ),
            LintTool::Pylint => pass_fail_outcome(
                &output,
                "No pylint issues",
                format!(
                    "Pylint issues found (exit code: {})",
                    output.exit_code.unwrap_or(-1)
                ),
            ),
        }
    }

    fn run_type_checker(&self, checker: TypeChecker) -> ToolOutcome {
        let cmd = CommandSpec::new(checker.binary())
            .arg("src/")
            .cwd(self.project_root.as_std_path());

        match self.runner.run(&cmd, DEEP_ANALYSIS_TIMEOUT) {
            Ok(output) if output.success() => ToolOutcome::passed("No type errors"),
            Ok(output) => {
                ToolOutcome::failed(format!("Type errors found: {}", output.stdout_string()))
            }
            Err(e) => absorb_runner_error(checker.binary(), &e),
        }
    }

    fn run_security_tool(&self, tool: SecurityTool) -> ToolOutcome {
        let (cmd, on_pass) = match tool {
            SecurityTool::Bandit => (
                CommandSpec::new(tool.binary()).args(["-r", "src/", "-f", "json"]),
                "No security issues",
            ),
            SecurityTool::Safety => (
                CommandSpec::new(tool.binary()).args(["check", "--json"]),
                "No dependency vulnerabilities",
            ),
        };
        let cmd = cmd.cwd(self.project_root.as_std_path());

        let output = match self.runner.run(&cmd, LINT_TIMEOUT) {
            Ok(output) => output,
            Err(e) => return absorb_runner_error(tool.binary(), &e),
        };

        match tool {
            SecurityTool::Bandit => bandit_outcome(&output, on_pass),
            SecurityTool::Safety => pass_fail_outcome(
                &output,
                on_pass,
                "Dependency vulnerabilities found".to_string(),
            ),
        }
    }
}

/// Map a runner error to the outcome it means for the gate: a missing
/// binary is a skip, a timeout or spawn failure an error.
fn absorb_runner_error(binary: &str, err: &RunnerError) -> ToolOutcome {
    if err.is_not_found() {
        ToolOutcome::skipped(format!("{binary} not available"))
    } else if err.is_timeout() {
        ToolOutcome::error(format!("{binary} timed out"))
    } else {
        ToolOutcome::error(err.to_string())
    }
}

fn pass_fail_outcome(output: &ProcessOutput, on_pass: &str, on_fail: String) -> ToolOutcome {
    if output.success() {
        ToolOutcome::passed(on_pass)
    } else {
        ToolOutcome::failed(on_fail)
    }
}

/// flake8 reports one violation per stdout line.
fn flake8_outcome(output: &ProcessOutput) -> ToolOutcome {
    if output.success() {
        return ToolOutcome::passed("No flake8 violations");
    }

    let violations: Vec<Violation> = output
        .stdout_string()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Violation {
            tool: "flake8".to_string(),
            message: line.trim().to_string(),
        })
        .collect();

    let mut outcome = ToolOutcome::failed(format!("Found {} flake8 violations", violations.len()));
    outcome.violations = violations;
    outcome
}

/// bandit exits nonzero when it finds anything, and emits a JSON report on
/// stdout. An empty `results` array despite a nonzero exit is a pass; a
/// report that does not parse is an error, not a silent pass.
fn bandit_outcome(output: &ProcessOutput, on_pass: &str) -> ToolOutcome {
    if output.success() {
        return ToolOutcome::passed(on_pass);
    }

    let Ok(report) = serde_json::from_str::<serde_json::Value>(&output.stdout_string()) else {
        return ToolOutcome::error("Failed to parse bandit output");
    };

    let issues: Vec<serde_json::Value> = report["results"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    if issues.is_empty() {
        return ToolOutcome::passed(on_pass);
    }

    let mut outcome = ToolOutcome::failed(format!("Found {} security issues", issues.len()));
    outcome.issues = issues;
    outcome
}
