//! CodeReview configuration schema.
//!
//! Every section has `#[serde(default)]`, so a partial YAML file (or none at
//! all) deserializes into a complete config.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Root configuration shared by the relay, the chat client and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeReviewConfig {
    pub relay: RelayConfig,
    pub provider: ProviderConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

/// Relay HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelayConfig {
    pub bind_address: String,
    pub port: u16,
    /// Maximum accepted request body; must leave room for JSON-escaped uploads.
    pub body_limit_bytes: usize,
    /// Allow any origin (the browser-era default).
    pub cors_permissive: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            port: defaults::DEFAULT_PORT,
            body_limit_bytes: defaults::DEFAULT_BODY_LIMIT_BYTES,
            cors_permissive: true,
        }
    }
}

/// Which text-generation backend the relay talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Canned replies, for offline development.
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Mock => "mock",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Reply returned by the mock provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_response: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: defaults::DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: defaults::DEFAULT_GEMINI_BASE_URL.to_string(),
            mock_response: None,
        }
    }
}

/// Colour scheme selection for the chat client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system preference, re-evaluated on every resolve.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Auto -> Light -> Dark -> Auto.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Auto => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Auto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Auto => "Auto",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Chat client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub relay_url: String,
    pub max_upload_bytes: u64,
    pub theme: ThemeMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: defaults::DEFAULT_RELAY_URL.to_string(),
            max_upload_bytes: defaults::DEFAULT_MAX_UPLOAD_BYTES,
            theme: ThemeMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling NDJSON log files.
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            dir: defaults::DEFAULT_LOG_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "relay:\n  port: 4000\nprovider:\n  kind: mock\n";
        let config: CodeReviewConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.relay.port, 4000);
        assert_eq!(config.relay.bind_address, defaults::DEFAULT_BIND_ADDRESS);
        assert_eq!(config.provider.kind, ProviderKind::Mock);
        assert_eq!(config.provider.model, defaults::DEFAULT_MODEL);
        assert_eq!(config.client.max_upload_bytes, 2_000_000);
    }

    #[test]
    fn test_theme_cycles() {
        assert_eq!(ThemeMode::Auto.next(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::Auto);
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert!("openai".parse::<ProviderKind>().is_err());
    }
}
