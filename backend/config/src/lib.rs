//! `codereview-config`: runtime configuration for the relay and chat client.
//!
//! Provides:
//! - Typed config schema with defaults for every field
//! - YAML loading from `~/.codereview/config.yaml`
//! - `${ENV_VAR}` substitution and well-known env overrides (`.env` aware)
//! - Config redaction for safe display
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{
    apply_env_overrides, load_dotenv, resolve_env_vars, resolve_env_vars_with, DotenvStatus,
    MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::redact;
pub use schema::{
    ClientConfig, CodeReviewConfig, LoggingConfig, ProviderConfig, ProviderKind, RelayConfig,
    ThemeMode,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// A loaded config together with everything worth logging about how it
/// was loaded.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: CodeReviewConfig,
    pub report: ValidationReport,
    pub dotenv: DotenvStatus,
}

impl PreparedConfig {
    /// Emit the `.env` outcome and validation findings. Call once a
    /// subscriber is installed; the log level itself comes from this config.
    pub fn log(&self) {
        self.dotenv.log();
        log_report(&self.report);
    }
}

/// Load, apply env substitution and overrides, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Nothing is
/// logged here; callers decide whether errors are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let dotenv = load_dotenv();
    let (config, report) = load_and_prepare_with(path, &env::process_env()).await?;
    Ok(PreparedConfig {
        config,
        report,
        dotenv,
    })
}

pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}

/// Same as [`load_and_prepare`] with an explicit environment (useful for testing).
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<(CodeReviewConfig, ValidationReport)> {
    let value = io::load_config_value(path).await?;

    let value =
        resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: CodeReviewConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env)?;

    let report = validate(&config);
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(
            &path,
            "provider:\n  apiKey: ${TEST_REVIEW_KEY}\nrelay:\n  port: 3100\n",
        )
        .unwrap();

        let env: HashMap<String, String> = [
            ("TEST_REVIEW_KEY".to_string(), "secret-value".to_string()),
            (env::PORT_VAR.to_string(), "3200".to_string()),
        ]
        .into_iter()
        .collect();

        let (config, report) = load_and_prepare_with(&path, &env).await.unwrap();
        assert!(report.is_valid());
        assert_eq!(config.provider.api_key.as_deref(), Some("secret-value"));
        // Env overrides win over the file.
        assert_eq!(config.relay.port, 3200);
    }
}
