use anyhow::Result;
use async_trait::async_trait;

/// Trait for hosted text-generation backends used by the relay.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "mock").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider: a fixed instruction followed by the user payload.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub instruction: String,
    pub payload: String,
}

impl LlmRequest {
    pub fn new(instruction: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            payload: payload.into(),
        }
    }
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
