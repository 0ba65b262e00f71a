//! Review Event Logger
//!
//! Structured review lifecycle events written through `tracing`. Payloads
//! are summarized by size; source code never reaches the log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewEvent {
    RequestReceived {
        payload_bytes: usize,
    },
    ProviderCompleted {
        provider: String,
        model: String,
        review_bytes: usize,
        tokens_used: u64,
        latency_ms: u64,
    },
    ProviderFailed {
        provider: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ReviewLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ReviewEvent,
}

pub struct ReviewEventLogger;

impl ReviewEventLogger {
    /// Logs a review event, redacting error text before it is serialized.
    pub fn log_event(request_id: &str, mut event: ReviewEvent) -> ReviewLogEntry {
        let failed = matches!(event, ReviewEvent::ProviderFailed { .. });
        if let ReviewEvent::ProviderFailed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let entry = ReviewLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        let json = serde_json::to_string(&entry).unwrap_or_default();
        if failed {
            warn!(target: "review_events", event = %json, "Review event");
        } else {
            info!(target: "review_events", event = %json, "Review event");
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_event_is_redacted() {
        let entry = ReviewEventLogger::log_event(
            "req-1",
            ReviewEvent::ProviderFailed {
                provider: "gemini".into(),
                error_msg: "403 for key=AIzaSyD-1234567890abcdefghijklmno".into(),
            },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["type"], "provider_failed");
        assert!(!json["event"]["error_msg"].as_str().unwrap().contains("AIzaSyD"));
    }
}
