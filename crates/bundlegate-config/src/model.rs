//! Typed quality configuration.
//!
//! Each phase gets its own struct with named fields and documented
//! defaults, validated eagerly at load time — no stringly-typed nested
//! lookups at the use sites.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_lint_tools() -> Vec<String> {
    vec!["flake8".to_string()]
}

fn default_type_tool() -> String {
    "mypy".to_string()
}

fn default_security_tools() -> Vec<String> {
    vec!["bandit".to_string()]
}

/// Top-level quality configuration, one section per phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityConfig {
    #[serde(default)]
    pub testing: TestingConfig,
    #[serde(default)]
    pub linting: LintingConfig,
    #[serde(default)]
    pub type_checking: TypeCheckingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub git_integration: GitConfig,
}

/// `[testing]` — test execution and the coverage gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minimum coverage percentage (0–100). Zero disables the coverage gate.
    #[serde(default)]
    pub coverage_threshold: u32,
}

impl Default for TestingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            coverage_threshold: 0,
        }
    }
}

/// `[linting]` — ordered list of lint tools to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_lint_tools")]
    pub tools: Vec<String>,
}

impl Default for LintingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tools: default_lint_tools(),
        }
    }
}

/// `[type_checking]` — exactly one type checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeCheckingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_type_tool")]
    pub tool: String,
}

impl Default for TypeCheckingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tool: default_type_tool(),
        }
    }
}

/// `[security]` — ordered list of security scanners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_security_tools")]
    pub tools: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tools: default_security_tools(),
        }
    }
}

/// `[git_integration]` — conditional commit automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub auto_commit: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_commit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_gate() {
        let config = QualityConfig::default();
        assert!(config.testing.enabled);
        assert!(config.linting.enabled);
        assert!(config.type_checking.enabled);
        assert!(config.security.enabled);
        assert!(config.git_integration.enabled);
    }

    #[test]
    fn test_partial_section_fills_remaining_defaults() {
        let config: QualityConfig = toml::from_str("[testing]\ncoverage_threshold = 75\n").unwrap();
        assert!(config.testing.enabled);
        assert_eq!(config.testing.coverage_threshold, 75);
        assert_eq!(config.linting.tools, vec!["flake8"]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<QualityConfig, _> = toml::from_str("[testing]\nthresold = 75\n");
        assert!(result.is_err());
    }
}
