//! Free-text failure categorization.

use bundlegate_utils::FailureCategory;

/// Classify a failure message into the remediation taxonomy.
///
/// Checked most-specific first so that, e.g., "mypy found type errors in
/// test file" lands on `type` rather than `test`.
#[must_use]
pub fn categorize_failure(error_message: &str) -> FailureCategory {
    let lower = error_message.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(&["mypy", "pyright", "type"]) {
        FailureCategory::Type
    } else if contains_any(&["bandit", "safety", "security", "vulnerability"]) {
        FailureCategory::Security
    } else if contains_any(&["flake8", "black", "isort", "pylint", "style", "lint"]) {
        FailureCategory::Lint
    } else if contains_any(&["pytest", "test", "assert", "fail"]) {
        FailureCategory::Test
    } else {
        FailureCategory::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_map_to_categories() {
        assert_eq!(categorize_failure("mypy found 3 errors"), FailureCategory::Type);
        assert_eq!(
            categorize_failure("bandit reported B602"),
            FailureCategory::Security
        );
        assert_eq!(
            categorize_failure("flake8 E501 line too long"),
            FailureCategory::Lint
        );
        assert_eq!(
            categorize_failure("pytest: 2 failed, 10 passed"),
            FailureCategory::Test
        );
    }

    #[test]
    fn test_type_takes_precedence_over_test() {
        assert_eq!(
            categorize_failure("type errors found in test file"),
            FailureCategory::Type
        );
    }

    #[test]
    fn test_security_takes_precedence_over_lint_and_test() {
        assert_eq!(
            categorize_failure("security lint test failed"),
            FailureCategory::Security
        );
    }

    #[test]
    fn test_generic_keywords() {
        assert_eq!(categorize_failure("AssertionError: 1 != 2"), FailureCategory::Test);
        assert_eq!(categorize_failure("code style violation"), FailureCategory::Lint);
        assert_eq!(
            categorize_failure("dependency vulnerability found"),
            FailureCategory::Security
        );
    }

    #[test]
    fn test_unmatched_message_is_unknown() {
        assert_eq!(categorize_failure("disk quota exceeded"), FailureCategory::Unknown);
    }
}
