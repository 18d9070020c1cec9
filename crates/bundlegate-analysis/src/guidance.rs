//! Remediation guidance lookup.

/// Substring-keyed guidance per tool. First match wins, so order entries
/// from most to least specific.
const FLAKE8_GUIDANCE: &[(&str, &str)] = &[
    ("E302", "Add 2 blank lines before function/class definitions"),
    (
        "E501",
        "Line too long - break into multiple lines or use shorter variable names",
    ),
    (
        "W503",
        "Line break before binary operator - this is a style preference",
    ),
    (
        "E203",
        "Whitespace before ':' - this is often a black vs flake8 conflict",
    ),
];

const MYPY_GUIDANCE: &[(&str, &str)] = &[
    (
        "error: Missing return statement",
        "Add explicit return statement or return type annotation",
    ),
    (
        "error: Incompatible return value type",
        "Check return type annotation matches actual return value",
    ),
    (
        "error: Need type annotation",
        "Add type annotations to function parameters and return values",
    ),
];

const BANDIT_GUIDANCE: &[(&str, &str)] = &[
    (
        "B602",
        "subprocess_popen_with_shell_equals_true - avoid shell=True, use list arguments instead",
    ),
    (
        "B608",
        "possible_sql_injection_in_string_based_query - use parameterized queries instead",
    ),
];

/// Map a tool's error output to actionable remediation text. Unknown tools
/// and unmatched messages fall back to a pointer at the tool's docs.
#[must_use]
pub fn get_remediation_guidance(tool: &str, error_message: &str) -> String {
    let table = match tool {
        "flake8" => FLAKE8_GUIDANCE,
        "mypy" => MYPY_GUIDANCE,
        "bandit" => BANDIT_GUIDANCE,
        _ => &[],
    };

    for (pattern, guidance) in table {
        if error_message.contains(pattern) {
            return (*guidance).to_string();
        }
    }

    format!("Check {tool} documentation for guidance on: {error_message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flake8_code_maps_to_guidance() {
        let guidance =
            get_remediation_guidance("flake8", "src/app.py:10:1: E302 expected 2 blank lines");
        assert_eq!(
            guidance,
            "Add 2 blank lines before function/class definitions"
        );
    }

    #[test]
    fn test_mypy_message_maps_to_guidance() {
        let guidance =
            get_remediation_guidance("mypy", "src/app.py:5: error: Missing return statement");
        assert!(guidance.contains("return statement"));
    }

    #[test]
    fn test_bandit_rule_maps_to_guidance() {
        let guidance = get_remediation_guidance("bandit", "Issue: [B602:subprocess_popen]");
        assert!(guidance.contains("shell=True"));
    }

    #[test]
    fn test_unmatched_message_falls_back_to_docs() {
        let guidance = get_remediation_guidance("flake8", "E999 SyntaxError");
        assert_eq!(
            guidance,
            "Check flake8 documentation for guidance on: E999 SyntaxError"
        );
    }

    #[test]
    fn test_unknown_tool_falls_back_to_docs() {
        let guidance = get_remediation_guidance("ruff", "F401 unused import");
        assert!(guidance.starts_with("Check ruff documentation"));
    }
}
