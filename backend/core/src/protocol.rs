//! JSON bodies exchanged between the chat client and the relay.

use serde::{Deserialize, Serialize};

/// Body of `POST /review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
}

/// Successful reply of `POST /review`: the model's markdown text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider: String,
    pub model: String,
}
