pub mod gemini;
pub mod mock;

use std::sync::Arc;

use codereview_config::{ProviderConfig, ProviderKind};
use codereview_core::{LlmProvider, ReviewError};

/// Construct the provider named by the config.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>, ReviewError> {
    match config.kind {
        ProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| ReviewError::ConfigError("missing Gemini API key".into()))?;
            Ok(Arc::new(
                gemini::GeminiProvider::new(api_key, config.model.clone())
                    .with_base_url(config.base_url.clone()),
            ))
        }
        ProviderKind::Mock => {
            let mut provider = mock::MockProvider::new("mock");
            if let Some(response) = &config.mock_response {
                provider = provider.with_response(response.clone());
            }
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codereview_core::LlmRequest;

    #[test]
    fn test_gemini_requires_key() {
        let config = ProviderConfig::default();
        assert!(matches!(
            build_provider(&config),
            Err(ReviewError::ConfigError(_))
        ));
    }

    #[test]
    fn test_gemini_built_with_configured_model() {
        let config = ProviderConfig {
            api_key: Some("k".into()),
            model: "gemini-2.5-pro".into(),
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_mock_echoes_payload_in_code_fence() {
        let config = ProviderConfig {
            kind: ProviderKind::Mock,
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        let resp = provider
            .complete(&LlmRequest::new("prompt", "x = 1"))
            .await
            .unwrap();
        assert!(resp.content.ends_with("```\nx = 1\n```"));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let provider = mock::MockProvider::new("mock").failing("quota exceeded");
        let err = provider
            .complete(&LlmRequest::new("p", "c"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
