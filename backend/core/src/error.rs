use thiserror::Error;

/// Top-level error type for a code review round trip.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("LLM provider error ({provider}): {message}")]
    LlmError { provider: String, message: String },

    #[error("provider returned an empty review")]
    EmptyReview,

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ReviewError {
    pub fn llm(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LlmError {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
