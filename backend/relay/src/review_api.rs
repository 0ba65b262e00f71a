//! Review Endpoint (`POST /review`).
//!
//! Marshals `{ "code": ... }` into an LLM request and returns
//! `{ "review": ... }`. Provider failures become `502` with a short error
//! body that clients are not expected to parse.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use codereview_core::{ReviewRequest, ReviewResponse};
use codereview_providers::build_request;
use logging::{redact_sensitive_data, ReviewEvent, ReviewEventLogger};

use crate::server::RelayState;

#[derive(Debug)]
pub enum ApiError {
    /// The upstream provider failed or returned nothing usable.
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream(message) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": redact_sensitive_data(&message) })),
            )
                .into_response(),
        }
    }
}

/// Handler for `POST /review`.
pub async fn review(
    State(state): State<RelayState>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    ReviewEventLogger::log_event(
        &request_id,
        ReviewEvent::RequestReceived {
            payload_bytes: payload.code.len(),
        },
    );

    let provider = state.provider.as_ref();
    match provider.complete(&build_request(payload.code)).await {
        Ok(resp) => {
            ReviewEventLogger::log_event(
                &request_id,
                ReviewEvent::ProviderCompleted {
                    provider: resp.provider.clone(),
                    model: resp.model.clone(),
                    review_bytes: resp.content.len(),
                    tokens_used: resp.tokens_used,
                    latency_ms: resp.latency_ms,
                },
            );
            Ok(Json(ReviewResponse {
                review: resp.content,
            }))
        }
        Err(e) => {
            error!(request_id = %request_id, provider = provider.name(), "Review failed");
            ReviewEventLogger::log_event(
                &request_id,
                ReviewEvent::ProviderFailed {
                    provider: provider.name().to_string(),
                    error_msg: format!("{e:#}"),
                },
            );
            Err(ApiError::Upstream(format!("review provider failed: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use codereview_config::RelayConfig;
    use codereview_core::HealthReport;
    use codereview_providers::providers::mock::MockProvider;

    use crate::server::build_router;

    use super::*;

    fn router_with(provider: MockProvider, config: &RelayConfig) -> axum::Router {
        build_router(RelayState::new(Arc::new(provider)), config)
    }

    fn post_review(body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/review")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_review_returns_provider_text() {
        let app = router_with(
            MockProvider::new("mock").with_response("## Review\n- Looks good"),
            &RelayConfig::default(),
        );

        let response = app
            .oneshot(post_review(json!({ "code": "let x = 1;" }).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "review": "## Review\n- Looks good" }));
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway() {
        let app = router_with(
            MockProvider::new("mock").failing("quota exceeded"),
            &RelayConfig::default(),
        );

        let response = app
            .oneshot(post_review(json!({ "code": "x" }).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_missing_code_field_is_rejected() {
        let app = router_with(MockProvider::new("mock"), &RelayConfig::default());
        let response = app
            .oneshot(post_review(json!({ "source": "x" }).to_string()))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_body_limit_applies() {
        let config = RelayConfig {
            body_limit_bytes: 64,
            ..Default::default()
        };
        let app = router_with(MockProvider::new("mock"), &config);
        let big = "x".repeat(1024);
        let response = app
            .oneshot(post_review(json!({ "code": big }).to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_two_megabyte_upload_fits_default_limit() {
        let provider = MockProvider::new("mock").with_response("ok");
        let app = router_with(provider, &RelayConfig::default());
        // Quotes double in size once JSON-escaped, pushing the body past 2 MiB.
        let code = "\"".repeat(1_100_000);
        let response = app
            .oneshot(post_review(json!({ "code": code }).to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_control_bytes_at_upload_cap_fit_default_limit() {
        let provider = MockProvider::new("mock").with_response("ok");
        let app = router_with(provider, &RelayConfig::default());
        // Each control byte is escaped as `\u00XX`, six bytes on the wire.
        let code = "\u{1}".repeat(2_000_000);
        let body = json!({ "code": code }).to_string();
        assert!(body.len() > 12_000_000);

        let response = app.oneshot(post_review(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = router_with(MockProvider::new("mock"), &RelayConfig::default());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/review")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_health_reports_provider() {
        let app = router_with(MockProvider::new("mock"), &RelayConfig::default());
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report: HealthReport = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(report.status, "ok");
        assert_eq!(report.provider, "mock");
        assert_eq!(report.model, "mock");
    }
}
