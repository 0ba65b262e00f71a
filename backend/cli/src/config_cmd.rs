//! `codereview config ...`: inspect the effective configuration.

use anyhow::Result;

use codereview_config::redact;

use crate::config::Loaded;

/// Effective config as pretty JSON with secrets masked.
pub fn show(loaded: &Loaded) -> Result<String> {
    let value = serde_json::to_value(&loaded.config)?;
    Ok(serde_json::to_string_pretty(&redact(&value))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codereview_config::CodeReviewConfig;

    #[test]
    fn test_show_masks_api_key() {
        let mut config = CodeReviewConfig::default();
        config.provider.api_key = Some("AIzaSyDUMMYDUMMYDUMMY".into());
        let loaded = Loaded {
            config,
            report: Default::default(),
            dotenv: codereview_config::DotenvStatus::NotFound,
            path: "config.yaml".into(),
        };

        let shown = show(&loaded).unwrap();
        assert!(!shown.contains("AIzaSyDUMMYDUMMYDUMMY"));
        assert!(shown.contains("\"relayUrl\""));
    }
}
