//! Atomic file operations for bundle artifacts.
//!
//! Bundle status and result files are rewritten wholesale on every
//! transition, so a crash mid-write must never leave a torn file behind.
//! Writes go through a temp file in the target directory, are fsynced,
//! and land via atomic rename. The error log is the one append-only
//! artifact and uses a plain appending open instead.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tempfile::NamedTempFile;

/// Atomically write `content` to `path` (temp file + fsync + rename).
///
/// Parent directories are created as needed. Line endings are normalized
/// to LF so artifacts diff cleanly across platforms.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<()> {
    let normalized = normalize_line_endings(content);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory: {parent}"))?;
    }

    // Temp file must live in the target directory so the rename stays on
    // one filesystem.
    let temp_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp_file = NamedTempFile::new_in(temp_dir)
        .with_context(|| format!("Failed to create temporary file in: {temp_dir}"))?;

    temp_file
        .write_all(normalized.as_bytes())
        .context("Failed to write content to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to fsync temporary file")?;

    temp_file
        .persist(path.as_std_path())
        .map_err(|e| anyhow::anyhow!(e.error))
        .with_context(|| format!("Failed to atomically write file: {path}"))?;

    Ok(())
}

/// Append a pre-formatted block to an append-only log file.
///
/// Creates the file (and parents) if missing. Not atomic by design:
/// the error log accumulates one block per failure and is never rewritten.
pub fn append_line_block(path: &Utf8Path, block: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory: {parent}"))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_std_path())
        .with_context(|| format!("Failed to open log file for append: {path}"))?;

    file.write_all(normalize_line_endings(block).as_bytes())
        .with_context(|| format!("Failed to append to log file: {path}"))?;

    Ok(())
}

/// Normalize line endings to LF.
fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
