//! Telemetry and structured logging components for CodeReview.
//!
//! Handles log redaction, JSON file output with daily rotation, and
//! structured review lifecycle events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ReviewEvent, ReviewEventLogger};
pub use logger::{init_console_logger, init_file_logger, init_logger};
pub use redact::redact_sensitive_data;
