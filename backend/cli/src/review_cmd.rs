//! `codereview review <file>`: one-shot review printed as plain text.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use codereview_core::FileInfo;
use markdown::Renderer;
use tui::upload::format_megabytes;
use tui::{read_upload, RelayClient, UploadError};

pub async fn run(file: &Path, relay_url: &str, max_upload_bytes: u64) -> Result<()> {
    let output = review_file(file, relay_url, max_upload_bytes).await?;
    print!("{output}");
    Ok(())
}

/// Upload `file` to the relay and render the reply without styling.
pub async fn review_file(file: &Path, relay_url: &str, max_upload_bytes: u64) -> Result<String> {
    let upload = match read_upload(file, max_upload_bytes).await {
        Ok(upload) => upload,
        Err(UploadError::TooLarge { name, max, .. }) => bail!(
            "File {name} is too large. Please upload files smaller than {}.",
            format_megabytes(max)
        ),
        Err(e) => return Err(e).with_context(|| file.display().to_string()),
    };

    info!(
        file = %upload.name,
        size = %FileInfo::new(upload.name.as_str(), upload.size).size_label(),
        relay = relay_url,
        "Requesting review"
    );
    let review = RelayClient::new(relay_url)
        .review(&upload.text)
        .await
        .map_err(|e| anyhow!("Failed to get review: {e}"))?;

    Ok(Renderer::to_plain_text(&Renderer::render_markdown(&review)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_review_file_renders_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/review"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "review": "## Issues\n- Use **const**\n```rust\nconst X: u8 = 1;\n```"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.rs");
        std::fs::write(&file, "static X: u8 = 1;").unwrap();

        let output = review_file(&file, &server.uri(), 2_000_000).await.unwrap();
        assert_eq!(output, "Issues\n- Use const\n```\nconst X: u8 = 1;\n```\n");
    }

    #[tokio::test]
    async fn test_oversized_file_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.rs");
        std::fs::write(&file, "x".repeat(11)).unwrap();

        let err = review_file(&file, &server.uri(), 10).await.unwrap_err();
        assert!(err.to_string().contains("File big.rs is too large"));
    }

    #[tokio::test]
    async fn test_relay_failure_reason_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        std::fs::write(&file, "fn a() {}").unwrap();

        let err = review_file(&file, &server.uri(), 2_000_000).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get review: status 502");
    }
}
