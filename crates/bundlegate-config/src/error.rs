//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or parsing the quality configuration.
///
/// All variants map to the `config` failure category.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Quality config not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read quality config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse quality config: {reason}")]
    Parse { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_path() {
        let err = ConfigError::NotFound {
            path: "quality.toml".to_string(),
        };
        assert_eq!(err.to_string(), "Quality config not found: quality.toml");
    }
}
