//! Tool registry.
//!
//! Every tool the analyzer knows how to drive is an enum variant; anything
//! else takes the explicit unsupported path at the call site (skipped for
//! lint/security, hard failure for type checking). String dispatch never
//! reaches the invocation layer.

use strum::{Display, EnumString};

/// Linting tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LintTool {
    Flake8,
    Black,
    Isort,
    Pylint,
}

impl LintTool {
    /// Binary name on the PATH.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            LintTool::Flake8 => "flake8",
            LintTool::Black => "black",
            LintTool::Isort => "isort",
            LintTool::Pylint => "pylint",
        }
    }
}

/// Type checkers. Exactly one runs per validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TypeChecker {
    Mypy,
    Pyright,
}

impl TypeChecker {
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            TypeChecker::Mypy => "mypy",
            TypeChecker::Pyright => "pyright",
        }
    }
}

/// Security scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SecurityTool {
    Bandit,
    Safety,
}

impl SecurityTool {
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            SecurityTool::Bandit => "bandit",
            SecurityTool::Safety => "safety",
        }
    }
}
