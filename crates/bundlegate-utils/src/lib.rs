//! Shared plumbing for bundlegate.
//!
//! This crate holds the pieces every other bundlegate crate leans on:
//! atomic file writes, the bundle directory layout, shared identifier
//! types, tracing initialization, and CLI exit codes.

pub mod atomic_write;
pub mod exit_codes;
pub mod logging;
pub mod paths;
pub mod types;

pub use atomic_write::{append_line_block, write_file_atomic};
pub use exit_codes::ExitCode;
pub use paths::BundlePaths;
pub use types::{FailureCategory, PhaseId};

/// Current UTC time formatted the way every bundle artifact expects it
/// (ISO-8601 with a trailing `Z`, second precision).
#[must_use]
pub fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_timestamp_shape() {
        let ts = utc_timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
