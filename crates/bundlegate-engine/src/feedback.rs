//! Remediation feedback document.

use bundlegate_utils::FailureCategory;

/// Render the `validation_failure_feedback.md` document for a failure.
///
/// Always the same skeleton: a header naming the category and time, the
/// error details, category-specific remediation steps, and generic next
/// steps. Rewritten wholesale on every failure so it always describes the
/// latest one (the cumulative history lives in the error log).
#[must_use]
pub fn generate_failure_feedback(
    category: FailureCategory,
    message: &str,
    timestamp: &str,
) -> String {
    let mut feedback = format!(
        "# Validation Failure Report\n\n\
         **Category:** {} Validation Failure\n\
         **Time:** {timestamp}\n\n\
         ## Error Details\n\n\
         {message}\n\n\
         ## Remediation Guidance\n\n",
        title_case(&category.to_string()),
    );

    match category {
        FailureCategory::Test => feedback.push_str(
            "### Test Failures\n\
             1. Review the test output above for specific assertion failures\n\
             2. Check if the implementation matches the test expectations\n\
             3. Verify test data and setup are correct\n\
             4. Consider if the test logic itself needs adjustment\n",
        ),
        FailureCategory::Lint => feedback.push_str(
            "### Linting Issues\n\
             1. Review code style violations listed above\n\
             2. Run the linting tool locally to see detailed line-by-line issues\n\
             3. Consider using auto-formatters like `black` or `autopep8`\n\
             4. Update code to follow project style guidelines\n",
        ),
        FailureCategory::Type => feedback.push_str(
            "### Type Checking Issues\n\
             1. Add missing type annotations to functions and variables\n\
             2. Fix type mismatches between expected and actual types\n\
             3. Import necessary types from `typing` module\n\
             4. Consider using `# type: ignore` for unavoidable type issues\n",
        ),
        FailureCategory::Security => feedback.push_str(
            "### Security Issues\n\
             1. Review security vulnerabilities identified above\n\
             2. Replace unsafe functions with secure alternatives\n\
             3. Validate and sanitize all user inputs\n\
             4. Update dependencies to non-vulnerable versions\n",
        ),
        FailureCategory::Config | FailureCategory::System | FailureCategory::Unknown => {}
    }

    feedback.push_str(
        "\n## Next Steps\n\n\
         1. Fix the issues identified above\n\
         2. Re-run validation to verify fixes\n\
         3. The task bundle has been preserved for debugging\n\
         4. Contact the development team if you need additional assistance\n\n\
         ## Bundle Location\n\n\
         This validation failure information is saved in the task bundle for future reference.\n",
    );

    feedback
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
