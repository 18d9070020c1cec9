//! Quality-gate configuration for bundlegate.
//!
//! The quality config is a small TOML document with one section per gate:
//!
//! ```toml
//! [testing]
//! enabled = true
//! coverage_threshold = 80
//!
//! [linting]
//! enabled = true
//! tools = ["flake8", "black"]
//!
//! [type_checking]
//! enabled = true
//! tool = "mypy"
//!
//! [security]
//! enabled = true
//! tools = ["bandit"]
//!
//! [git_integration]
//! enabled = true
//! auto_commit = true
//! ```
//!
//! Every phase defaults to `enabled = true`: omitting a section must never
//! silently skip a gate. The config is loaded once per validation run and
//! immutable thereafter.
//!
//! Two parser backends implement the same interface (see [`ParserBackend`]):
//! the full `toml` crate, and a minimal section/`key = value` reader for
//! stripped-down environments. `load_quality_config` uses the TOML backend.

mod error;
mod minimal;
mod model;

pub use error::ConfigError;
pub use model::{
    GitConfig, LintingConfig, QualityConfig, SecurityConfig, TestingConfig, TypeCheckingConfig,
};

use std::path::Path;

/// Which parser implementation to use for config content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserBackend {
    /// Full TOML parsing via the `toml` crate.
    #[default]
    Toml,
    /// Minimal section/`key = value` reader with bool/int coercion.
    Minimal,
}

/// Parse quality config content with the given backend.
pub fn parse_str(content: &str, backend: ParserBackend) -> Result<QualityConfig, ConfigError> {
    match backend {
        ParserBackend::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        }),
        ParserBackend::Minimal => minimal::parse_str(content),
    }
}

/// Load the quality configuration from a TOML file.
///
/// The file must exist; a missing file is a configuration error, not a
/// "run with defaults" situation — an operator pointing at the wrong path
/// should hear about it.
pub fn load_quality_config(path: impl AsRef<Path>) -> Result<QualityConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_str(&content, ParserBackend::Toml)
}
