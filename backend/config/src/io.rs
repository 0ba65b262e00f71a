//! Config file loading.

use crate::schema::CodeReviewConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the CodeReview config directory.
/// Priority: `CODEREVIEW_CONFIG_DIR` env > `~/.codereview/` > `./.codereview`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CODEREVIEW_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".codereview"))
        .unwrap_or_else(|| PathBuf::from(".codereview"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load the raw YAML config as a JSON value tree.
///
/// Returns an empty object if the file doesn't exist (first run).
pub async fn load_config_value(path: &Path) -> Result<serde_json::Value> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as null.
    let value: serde_json::Value = serde_yaml::from_str::<Option<serde_json::Value>>(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));

    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

/// Load and parse the config from disk without env processing.
pub async fn load_config(path: &Path) -> Result<CodeReviewConfig> {
    let value = load_config_value(path).await?;
    serde_json::from_value(value)
        .with_context(|| format!("Invalid config structure at: {}", path.display()))
}
