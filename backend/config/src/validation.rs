//! Config validation: checks with user-friendly error messages.

use crate::defaults;
use crate::schema::{CodeReviewConfig, ProviderKind};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &CodeReviewConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_relay(config, &mut report);
    validate_provider(config, &mut report);
    validate_client(config, &mut report);
    report
}

fn validate_relay(config: &CodeReviewConfig, report: &mut ValidationReport) {
    let relay = &config.relay;
    if relay.bind_address.trim().is_empty() {
        report.error("relay.bindAddress", "Bind address cannot be empty");
    }
    if relay.port == 0 {
        report.error("relay.port", "Port must be between 1 and 65535");
    }
    let required = defaults::required_body_limit(config.client.max_upload_bytes);
    if (relay.body_limit_bytes as u64) < required {
        report.warn(
            "relay.bodyLimitBytes",
            format!(
                "Body limit is below {required} bytes; a JSON-escaped upload at the client cap may be rejected"
            ),
        );
    }
}

fn validate_provider(config: &CodeReviewConfig, report: &mut ValidationReport) {
    let provider = &config.provider;
    if provider.kind == ProviderKind::Gemini {
        if provider.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            report.error(
                "provider.apiKey",
                "Gemini requires an API key (set GEMINI_API_KEY)",
            );
        }
        if provider.model.trim().is_empty() {
            report.error("provider.model", "Model cannot be empty");
        }
        if !provider.base_url.starts_with("http://") && !provider.base_url.starts_with("https://") {
            report.error("provider.baseUrl", "Base URL must start with http:// or https://");
        }
    }
    if provider.kind == ProviderKind::Mock && provider.api_key.is_some() {
        report.warn("provider.apiKey", "API key is ignored by the mock provider");
    }
}

fn validate_client(config: &CodeReviewConfig, report: &mut ValidationReport) {
    let client = &config.client;
    if !client.relay_url.starts_with("http://") && !client.relay_url.starts_with("https://") {
        report.error("client.relayUrl", "Relay URL must start with http:// or https://");
    }
    if client.max_upload_bytes == 0 {
        report.error("client.maxUploadBytes", "Upload cap must be greater than zero");
    }
}
