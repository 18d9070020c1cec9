//! Test file discovery.

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobMatcher};

/// Directories that never contain project test files.
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".task_bundles",
    "__pycache__",
    ".venv",
    "venv",
    "node_modules",
    "target",
];

/// Find files matching `pattern` anywhere under `root`, sorted for
/// deterministic invocation order. Pattern matches against the file name
/// only (e.g. `test_task_017*.py`).
pub fn find_recursive(root: &Utf8Path, pattern: &str) -> Vec<Utf8PathBuf> {
    let Ok(glob) = Glob::new(pattern) else {
        return Vec::new();
    };
    let matcher = glob.compile_matcher();

    let mut found = Vec::new();
    walk(root, &matcher, &mut found);
    found.sort();
    found
}

/// Find files matching `pattern` directly inside `root/subdir` (no
/// recursion), sorted.
pub fn find_in_dir(root: &Utf8Path, subdir: &str, pattern: &str) -> Vec<Utf8PathBuf> {
    let Ok(glob) = Glob::new(pattern) else {
        return Vec::new();
    };
    let matcher = glob.compile_matcher();
    let dir = root.join(subdir);

    let Ok(entries) = dir.read_dir_utf8() else {
        return Vec::new();
    };

    let mut found: Vec<Utf8PathBuf> = entries
        .flatten()
        .filter(|entry| {
            entry
                .file_type()
                .map(|ft| ft.is_file())
                .unwrap_or(false)
                && matcher.is_match(entry.file_name())
        })
        .map(|entry| entry.path().to_owned())
        .collect();
    found.sort();
    found
}

fn walk(dir: &Utf8Path, matcher: &GlobMatcher, found: &mut Vec<Utf8PathBuf>) {
    let Ok(entries) = dir.read_dir_utf8() else {
        return;
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if !SKIP_DIRS.contains(&entry.file_name()) {
                walk(entry.path(), matcher, found);
            }
        } else if file_type.is_file() && matcher.is_match(entry.file_name()) {
            found.push(entry.path().to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &std::path::Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_recursive_discovery_matches_task_pattern() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/test_task_017_blueprints.py");
        touch(dir.path(), "src/nested/test_task_017_extra.py");
        touch(dir.path(), "tests/test_task_018_other.py");
        touch(dir.path(), "tests/helper.py");

        let found = find_recursive(&utf8_root(&dir), "test_task_017*.py");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.file_name().unwrap().starts_with("test_task_017")));
    }

    #[test]
    fn test_recursive_discovery_skips_vendored_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".venv/lib/test_task_001.py");
        touch(dir.path(), ".git/test_task_001.py");
        touch(dir.path(), "tests/test_task_001.py");

        let found = find_recursive(&utf8_root(&dir), "test_task_001*.py");
        assert_eq!(found.len(), 1);
        assert!(found[0].as_str().contains("tests/"));
    }

    #[test]
    fn test_find_in_dir_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/test_alpha.py");
        touch(dir.path(), "tests/deep/test_beta.py");

        let found = find_in_dir(&utf8_root(&dir), "tests", "test_*.py");
        assert_eq!(found.len(), 1);
        assert!(found[0].as_str().ends_with("test_alpha.py"));
    }

    #[test]
    fn test_missing_dir_yields_empty() {
        let dir = TempDir::new().unwrap();
        assert!(find_in_dir(&utf8_root(&dir), "tests", "test_*.py").is_empty());
        assert!(find_recursive(&utf8_root(&dir).join("absent"), "*.py").is_empty());
    }

    #[test]
    fn test_results_are_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/test_b.py");
        touch(dir.path(), "tests/test_a.py");
        touch(dir.path(), "tests/test_c.py");

        let found = find_in_dir(&utf8_root(&dir), "tests", "test_*.py");
        let names: Vec<_> = found.iter().map(|p| p.file_name().unwrap()).collect();
        assert_eq!(names, vec!["test_a.py", "test_b.py", "test_c.py"]);
    }
}
