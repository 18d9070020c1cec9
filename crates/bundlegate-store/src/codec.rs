//! Status file codecs.
//!
//! Primary codec is YAML via serde. A minimal flat-file codec implements
//! the same interface for stripped-down environments; it understands only
//! scalar `key: value` lines, which is all the status record needs.

use std::str::FromStr;

use crate::{BundleState, BundleStatus, StoreError};

/// Encode/decode seam for the bundle status file.
pub trait StatusCodec {
    fn decode(&self, content: &str) -> Result<BundleStatus, StoreError>;
    fn encode(&self, status: &BundleStatus) -> Result<String, StoreError>;
}

/// Full YAML codec (serde_yaml).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl StatusCodec for YamlCodec {
    fn decode(&self, content: &str) -> Result<BundleStatus, StoreError> {
        serde_yaml::from_str(content).map_err(|e| StoreError::Decode {
            reason: e.to_string(),
        })
    }

    fn encode(&self, status: &BundleStatus) -> Result<String, StoreError> {
        serde_yaml::to_string(status).map_err(|e| StoreError::Encode {
            reason: e.to_string(),
        })
    }
}

/// Minimal flat `key: value` codec.
///
/// Secondary implementation of [`StatusCodec`]: scalar values only, with
/// bool/int/null coercion and quote stripping on decode. Unknown keys land
/// in `extra` as strings so a later YAML rewrite does not lose them.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalCodec;

impl StatusCodec for MinimalCodec {
    fn decode(&self, content: &str) -> Result<BundleStatus, StoreError> {
        let mut status = BundleStatus::default();

        for line in content.lines() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            // Nested blocks are beyond this codec; flat keys start at column 0.
            if line.starts_with(' ') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim());

            match key {
                "status" => {
                    status.status =
                        BundleState::from_str(value).map_err(|_| StoreError::Decode {
                            reason: format!("unknown bundle status '{value}'"),
                        })?;
                }
                "workflow_phase" => status.workflow_phase = opt_string(value),
                "last_updated" => status.last_updated = opt_string(value),
                "created_at" => status.created_at = opt_string(value),
                "validation_started_at" => status.validation_started_at = opt_string(value),
                "validation_completed_at" => status.validation_completed_at = opt_string(value),
                "bundler_agent_completed" => status.bundler_agent_completed = value == "true",
                "coder_agent_completed" => status.coder_agent_completed = value == "true",
                "validator_agent_completed" => status.validator_agent_completed = value == "true",
                "error_category" => status.error_category = opt_string(value),
                "commit_sha" => status.commit_sha = opt_string(value),
                _ => {
                    status
                        .extra
                        .insert(key.to_string(), coerce_scalar(value));
                }
            }
        }

        Ok(status)
    }

    fn encode(&self, status: &BundleStatus) -> Result<String, StoreError> {
        let mut out = String::new();
        out.push_str(&format!("status: {}\n", status.status));

        let mut push_opt = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                out.push_str(&format!("{key}: \"{value}\"\n"));
            }
        };
        push_opt("workflow_phase", &status.workflow_phase);
        push_opt("last_updated", &status.last_updated);
        push_opt("created_at", &status.created_at);
        push_opt("validation_started_at", &status.validation_started_at);
        push_opt("validation_completed_at", &status.validation_completed_at);
        push_opt("error_category", &status.error_category);
        push_opt("commit_sha", &status.commit_sha);

        out.push_str(&format!(
            "bundler_agent_completed: {}\n",
            status.bundler_agent_completed
        ));
        out.push_str(&format!(
            "coder_agent_completed: {}\n",
            status.coder_agent_completed
        ));
        out.push_str(&format!(
            "validator_agent_completed: {}\n",
            status.validator_agent_completed
        ));

        for (key, value) in &status.extra {
            match value {
                serde_yaml::Value::Null => out.push_str(&format!("{key}: null\n")),
                serde_yaml::Value::Bool(b) => out.push_str(&format!("{key}: {b}\n")),
                serde_yaml::Value::Number(n) => out.push_str(&format!("{key}: {n}\n")),
                serde_yaml::Value::String(s) => out.push_str(&format!("{key}: \"{s}\"\n")),
                _ => {
                    return Err(StoreError::Encode {
                        reason: format!("minimal codec cannot encode nested value for '{key}'"),
                    });
                }
            }
        }

        Ok(out)
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

fn opt_string(value: &str) -> Option<String> {
    if value.is_empty() || value == "null" || value == "~" {
        None
    } else {
        Some(value.to_string())
    }
}

fn coerce_scalar(value: &str) -> serde_yaml::Value {
    if value == "null" || value == "~" || value.is_empty() {
        serde_yaml::Value::Null
    } else if value == "true" {
        serde_yaml::Value::Bool(true)
    } else if value == "false" {
        serde_yaml::Value::Bool(false)
    } else if let Ok(n) = value.parse::<i64>() {
        serde_yaml::Value::Number(n.into())
    } else {
        serde_yaml::Value::String(value.to_string())
    }
}
