//! Minimal config reader.
//!
//! Secondary backend behind the same `parse_str` interface as the TOML
//! one, for stripped-down environments where only flat
//! `[section]` / `key = value` documents need to be understood. Handles
//! `#` comments, quote stripping, `true`/`false` and digit coercion, and
//! single-line string arrays. Anything fancier belongs to the TOML
//! backend.

use crate::{ConfigError, QualityConfig};

pub(crate) fn parse_str(content: &str) -> Result<QualityConfig, ConfigError> {
    let mut config = QualityConfig::default();
    let mut section: Option<String> = None;

    for (line_no, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line).trim().to_string();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = Some(line[1..line.len() - 1].trim().to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Parse {
                reason: format!("line {}: expected 'key = value', got '{line}'", line_no + 1),
            });
        };
        let key = key.trim();
        let value = value.trim();

        let Some(ref section) = section else {
            return Err(ConfigError::Parse {
                reason: format!("line {}: key '{key}' outside any section", line_no + 1),
            });
        };

        apply(&mut config, section, key, value, line_no + 1)?;
    }

    Ok(config)
}

fn apply(
    config: &mut QualityConfig,
    section: &str,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::Parse {
        reason: format!("line {line_no}: unknown key '{key}' in section '{section}'"),
    };

    match (section, key) {
        ("testing", "enabled") => config.testing.enabled = parse_bool(value, line_no)?,
        ("testing", "coverage_threshold") => {
            config.testing.coverage_threshold = parse_int(value, line_no)?;
        }
        ("linting", "enabled") => config.linting.enabled = parse_bool(value, line_no)?,
        ("linting", "tools") => config.linting.tools = parse_string_array(value, line_no)?,
        ("type_checking", "enabled") => {
            config.type_checking.enabled = parse_bool(value, line_no)?;
        }
        ("type_checking", "tool") => config.type_checking.tool = unquote(value).to_string(),
        ("security", "enabled") => config.security.enabled = parse_bool(value, line_no)?,
        ("security", "tools") => config.security.tools = parse_string_array(value, line_no)?,
        ("git_integration", "enabled") => {
            config.git_integration.enabled = parse_bool(value, line_no)?;
        }
        ("git_integration", "auto_commit") => {
            config.git_integration.auto_commit = parse_bool(value, line_no)?;
        }
        ("testing" | "linting" | "type_checking" | "security" | "git_integration", _) => {
            return Err(unknown());
        }
        _ => {
            return Err(ConfigError::Parse {
                reason: format!("line {line_no}: unknown section '{section}'"),
            });
        }
    }

    Ok(())
}

fn strip_comment(line: &str) -> &str {
    // Good enough for flat configs: '#' inside quoted strings is not
    // supported by this backend.
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
        })
        .unwrap_or(value)
}

fn parse_bool(value: &str, line_no: usize) -> Result<bool, ConfigError> {
    match unquote(value).to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::Parse {
            reason: format!("line {line_no}: expected boolean, got '{other}'"),
        }),
    }
}

fn parse_int(value: &str, line_no: usize) -> Result<u32, ConfigError> {
    unquote(value).parse().map_err(|_| ConfigError::Parse {
        reason: format!("line {line_no}: expected integer, got '{value}'"),
    })
}

fn parse_string_array(value: &str, line_no: usize) -> Result<Vec<String>, ConfigError> {
    let Some(inner) = value
        .trim()
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
    else {
        return Err(ConfigError::Parse {
            reason: format!("line {line_no}: expected array like [\"a\", \"b\"], got '{value}'"),
        });
    };

    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    Ok(inner
        .split(',')
        .map(|item| unquote(item.trim()).to_string())
        .collect())
}
