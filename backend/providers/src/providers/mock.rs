use anyhow::{anyhow, Result};
use async_trait::async_trait;
use codereview_core::{LlmProvider, LlmRequest, LlmResponse};

const CANNED_REVIEW: &str = "## Review\n- Looks good.\n";

/// A mock LLM provider that returns canned responses.
///
/// Without a fixed response it echoes the payload back inside a fenced
/// block, which mirrors the shape of a real review.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    failure: Option<String>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            failure: None,
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Make every call fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, req: &LlmRequest) -> Result<LlmResponse> {
        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }
        let content = self
            .fixed_response
            .clone()
            .unwrap_or_else(|| format!("{CANNED_REVIEW}\n```\n{}\n```", req.payload));
        Ok(LlmResponse {
            content,
            provider: self.name.clone(),
            model: "mock".to_string(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
