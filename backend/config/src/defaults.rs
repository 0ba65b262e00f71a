//! Config defaults.

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 3000;

/// Worst-case growth of a string under JSON escaping: a control byte
/// becomes `\u00XX`.
pub const JSON_ESCAPE_FACTOR: u64 = 6;

/// Room for the `{"code": ...}` envelope on top of the escaped payload.
pub const BODY_ENVELOPE_HEADROOM: u64 = 64 * 1024;

/// Smallest request body limit that admits any upload of `max_upload_bytes`.
pub const fn required_body_limit(max_upload_bytes: u64) -> u64 {
    max_upload_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_ENVELOPE_HEADROOM)
}

pub const DEFAULT_BODY_LIMIT_BYTES: usize =
    required_body_limit(DEFAULT_MAX_UPLOAD_BYTES) as usize;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3000";

/// Upload cap in bytes, inclusive.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2_000_000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";
