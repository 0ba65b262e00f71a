//! Environment handling for config values.
//!
//! Two mechanisms, applied in this order at load time:
//! - `${VAR_NAME}` references inside string values of the config file
//!   (uppercase names only; `$${VAR}` escapes to a literal `${VAR}`),
//! - well-known environment variables that override individual fields.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::schema::{CodeReviewConfig, ProviderKind};

/// Optional leading `$` marks an escaped reference.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const PROVIDER_VAR: &str = "CODEREVIEW_PROVIDER";
pub const MODEL_VAR: &str = "CODEREVIEW_MODEL";
pub const BIND_VAR: &str = "CODEREVIEW_BIND";
pub const PORT_VAR: &str = "CODEREVIEW_PORT";
pub const RELAY_URL_VAR: &str = "CODEREVIEW_RELAY_URL";
pub const LOG_DIR_VAR: &str = "CODEREVIEW_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// What happened to the `.env` file. Loading runs before logging is set up,
/// so the outcome is reported back instead of logged here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    NotFound,
    Unreadable(String),
}

impl DotenvStatus {
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => debug!(path = %path.display(), "Loaded .env file"),
            DotenvStatus::NotFound => {}
            DotenvStatus::Unreadable(error) => debug!(%error, "Ignoring unreadable .env file"),
        }
    }
}

/// Load a `.env` file from the working directory (or a parent) if present.
pub fn load_dotenv() -> DotenvStatus {
    match dotenvy::dotenv() {
        Ok(path) => DotenvStatus::Loaded(path),
        Err(e) if e.not_found() => DotenvStatus::NotFound,
        Err(e) => DotenvStatus::Unreadable(e.to_string()),
    }
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in a config JSON value tree.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &process_env())
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply well-known environment variables on top of a loaded config.
pub fn apply_env_overrides(
    mut config: CodeReviewConfig,
    env: &HashMap<String, String>,
) -> Result<CodeReviewConfig> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(key) = get(GEMINI_API_KEY).or_else(|| get(GOOGLE_API_KEY)) {
        config.provider.api_key = Some(key.to_string());
    }
    if let Some(kind) = get(PROVIDER_VAR) {
        config.provider.kind = kind
            .parse::<ProviderKind>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {PROVIDER_VAR}"))?;
    }
    if let Some(model) = get(MODEL_VAR) {
        config.provider.model = model.to_string();
    }
    if let Some(bind) = get(BIND_VAR) {
        config.relay.bind_address = bind.to_string();
    }
    if let Some(port) = get(PORT_VAR) {
        config.relay.port = port
            .parse()
            .with_context(|| format!("Invalid {PORT_VAR}: {port}"))?;
    }
    if let Some(url) = get(RELAY_URL_VAR) {
        config.client.relay_url = url.to_string();
    }
    if let Some(dir) = get(LOG_DIR_VAR) {
        config.logging.dir = dir.to_string();
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.logging.level = level.to_string();
    }
    Ok(config)
}
