//! Config loading and command-line overrides shared by all subcommands.

use std::path::PathBuf;

use anyhow::Result;

use codereview_config::{
    config_dir, config_file_path, load_and_prepare, CodeReviewConfig, DotenvStatus, RelayConfig,
    ValidationReport,
};

/// Config as loaded from disk and the environment, before any flags apply.
pub struct Loaded {
    pub config: CodeReviewConfig,
    pub report: ValidationReport,
    pub dotenv: DotenvStatus,
    pub path: PathBuf,
}

impl Loaded {
    /// Replay what happened during loading. Call after a logger is installed.
    pub fn log_startup(&self) {
        self.dotenv.log();
        codereview_config::log_report(&self.report);
    }
}

/// `--config`, or the default file in the config directory.
pub fn resolve_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| config_file_path(&config_dir()))
}

pub async fn load(path: PathBuf) -> Result<Loaded> {
    let prepared = load_and_prepare(&path).await?;
    Ok(Loaded {
        config: prepared.config,
        report: prepared.report,
        dotenv: prepared.dotenv,
        path,
    })
}

/// Apply `serve --port/--bind` on top of the relay section.
pub fn relay_with_overrides(
    relay: &RelayConfig,
    port: Option<u16>,
    bind: Option<String>,
) -> RelayConfig {
    RelayConfig {
        port: port.unwrap_or(relay.port),
        bind_address: bind.unwrap_or_else(|| relay.bind_address.clone()),
        ..relay.clone()
    }
}

/// `--relay-url` wins over the configured client URL.
pub fn relay_url(config: &CodeReviewConfig, flag: Option<String>) -> String {
    flag.unwrap_or_else(|| config.client.relay_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_relay_section() {
        let relay = RelayConfig::default();
        let merged = relay_with_overrides(&relay, Some(4000), None);
        assert_eq!(merged.port, 4000);
        assert_eq!(merged.bind_address, relay.bind_address);
        assert_eq!(merged.body_limit_bytes, relay.body_limit_bytes);

        let merged = relay_with_overrides(&relay, None, Some("0.0.0.0".into()));
        assert_eq!(merged.port, relay.port);
        assert_eq!(merged.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_relay_url_flag_wins() {
        let config = CodeReviewConfig::default();
        assert_eq!(relay_url(&config, None), "http://localhost:3000");
        assert_eq!(relay_url(&config, Some("http://x:1".into())), "http://x:1");
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(dir.path().join("config.yaml")).await.unwrap();
        assert_eq!(loaded.path, dir.path().join("config.yaml"));
        assert_eq!(loaded.config.client.max_upload_bytes, 2_000_000);
    }

    #[tokio::test]
    async fn test_load_keeps_validation_report_for_later_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "relay:\n  bodyLimitBytes: 1024\n").unwrap();

        let loaded = load(path).await.unwrap();
        assert!(loaded
            .report
            .warnings
            .iter()
            .any(|w| w.path == "relay.bodyLimitBytes"));
    }

    #[test]
    fn test_path_resolves_without_reading_the_file() {
        let flag = PathBuf::from("/nonexistent/broken.yaml");
        assert_eq!(resolve_path(Some(flag.clone())), flag);
    }
}
