//! Relay Client
//!
//! Talks to the relay over HTTP. Holds no state besides the base URL.

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use codereview_core::{HealthReport, ReviewRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx answer from the relay.
    #[error("status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /review`. A 2xx body without a `review` string comes back as
    /// pretty-printed JSON so the user still sees something.
    pub async fn review(&self, code: &str) -> Result<String, ClientError> {
        debug!(bytes = code.len(), url = %self.base_url, "Requesting review");
        let response = self
            .client
            .post(format!("{}/review", self.base_url))
            .json(&ReviewRequest {
                code: code.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let data: Value = response.json().await?;
        Ok(match data.get("review").and_then(Value::as_str) {
            Some(review) => review.to_string(),
            None => serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
        })
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::app::{AppState, Command, FALLBACK_REPLY};

    #[tokio::test]
    async fn test_review_returns_review_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/review"))
            .and(body_json(json!({ "code": "let x = 1;" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "review": "## ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let review = RelayClient::new(server.uri())
            .review("let x = 1;")
            .await
            .unwrap();
        assert_eq!(review, "## ok");
    }

    #[tokio::test]
    async fn test_missing_review_field_is_pretty_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/review"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "note": "odd" })))
            .mount(&server)
            .await;

        let review = RelayClient::new(server.uri()).review("x").await.unwrap();
        assert_eq!(review, "{\n  \"note\": \"odd\"\n}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/review"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({ "error": "x" })))
            .mount(&server)
            .await;

        let err = RelayClient::new(server.uri()).review("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Status(502)));
        assert_eq!(err.to_string(), "status 502");
    }

    #[tokio::test]
    async fn test_server_error_flow_updates_state_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/review"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = RelayClient::new(server.uri());
        let mut state = AppState::default();
        state.input = "fn broken(".into();

        let Some(Command::Review(code)) = state.submit_input() else {
            panic!("expected a review command");
        };
        assert!(state.loading);

        let result = client.review(&code).await.map_err(|e| e.to_string());
        state.finish_review(result);

        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to get review: status 500")
        );
        let bots: Vec<_> = state.conversation.iter().filter(|m| m.is_bot()).collect();
        assert_eq!(bots.len(), 1);
        assert_eq!(bots[0].text, FALLBACK_REPLY);
        assert_eq!(state.conversation.len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "service": "codereview-relay",
                "version": "0.1.0",
                "provider": "mock",
                "model": "mock"
            })))
            .mount(&server)
            .await;

        let report = RelayClient::new(format!("{}/", server.uri()))
            .health()
            .await
            .unwrap();
        assert_eq!(report.status, "ok");
        assert_eq!(report.provider, "mock");
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        let err = RelayClient::new("http://127.0.0.1:1")
            .review("x")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
