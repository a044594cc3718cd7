//! Remote transcription client for vision message APIs.

use async_trait::async_trait;
use base64::Engine;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{RecrError, TranscriptionError};
use crate::models::config::TranscriptionConfig;

use super::Transcriber;

/// Model used when the config leaves it unset.
const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Prompt sent alongside the receipt image.
const TRANSCRIBE_PROMPT: &str = "Transcribe every readable character in this receipt image. \
     Output plain text only, one output line per printed line.";

/// Client for an external vision message API.
///
/// Sends the image as a base64 content block and reads the plain-text
/// transcription back from the response content blocks.
pub struct RemoteTranscriber {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteTranscriber {
    /// Create a client from the transcription configuration.
    pub fn new(config: &TranscriptionConfig) -> Result<Self, RecrError> {
        if config.api_key.is_empty() {
            return Err(RecrError::Config(
                "transcription API key is not set".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RecrError::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            model = ?config.model,
            timeout = config.timeout_secs,
            "remote transcriber initialized"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Media type for the request, sniffed from the image bytes.
    /// Unknown formats fall back to JPEG, the common case for photos.
    fn media_type(image: &[u8]) -> &'static str {
        match image::guess_format(image) {
            Ok(image::ImageFormat::Png) => "image/png",
            Ok(image::ImageFormat::WebP) => "image/webp",
            Ok(image::ImageFormat::Gif) => "image/gif",
            _ => "image/jpeg",
        }
    }

    /// Join the `content[].text` blocks of a messages-API response.
    /// Empty content is a valid empty transcription, not an error.
    fn parse_response(body: &str) -> Result<String, TranscriptionError> {
        let response: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            TranscriptionError::RecognitionFailed(format!("malformed response: {}", e))
        })?;

        let mut text = String::new();
        if let Some(content) = response.get("content").and_then(|c| c.as_array()) {
            for block in content {
                if let Some(t) = block.get("text").and_then(|t| t.as_str()) {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(t);
                }
            }
        }

        Ok(text)
    }

    /// Classify a non-success response. Quota and billing refusals are kept
    /// distinct from generic recognition failures.
    fn classify_failure(status: reqwest::StatusCode, body: &str) -> TranscriptionError {
        let detail = format!("{}: {}", status, body.chars().take(200).collect::<String>());

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return TranscriptionError::QuotaExceeded(detail);
        }

        let error_type = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("type"))
                    .and_then(|t| t.as_str())
                    .map(str::to_owned)
            });

        match error_type.as_deref() {
            Some(t) if t.contains("quota") || t.contains("billing") || t.contains("rate_limit") => {
                TranscriptionError::QuotaExceeded(detail)
            }
            _ => TranscriptionError::RecognitionFailed(detail),
        }
    }
}

#[async_trait]
impl Transcriber for RemoteTranscriber {
    async fn transcribe(&self, image: &[u8]) -> Result<String, TranscriptionError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);

        let request_body = json!({
            "model": self.model,
            "max_tokens": 2048,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": Self::media_type(image),
                            "data": encoded
                        }
                    },
                    {
                        "type": "text",
                        "text": TRANSCRIBE_PROMPT
                    }
                ]
            }]
        });

        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            image_size = image.len(),
            "calling transcription service"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| TranscriptionError::RecognitionFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            TranscriptionError::RecognitionFailed(format!("failed to read response: {}", e))
        })?;

        if !status.is_success() {
            warn!(status = %status, "transcription service returned an error");
            return Err(Self::classify_failure(status, &body));
        }

        let text = Self::parse_response(&body)?;
        debug!(chars = text.len(), "transcription received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_requires_api_key() {
        let config = TranscriptionConfig::default();
        assert!(RemoteTranscriber::new(&config).is_err());

        let config = TranscriptionConfig {
            api_key: "test-key".to_string(),
            ..TranscriptionConfig::default()
        };
        assert!(RemoteTranscriber::new(&config).is_ok());
    }

    #[test]
    fn test_parse_response_joins_blocks() {
        let body = r#"{
            "content": [
                {"type": "text", "text": "STORE NAME\nTOTAL: 12.00"},
                {"type": "text", "text": "THANK YOU"}
            ]
        }"#;
        let text = RemoteTranscriber::parse_response(body).unwrap();
        assert_eq!(text, "STORE NAME\nTOTAL: 12.00\nTHANK YOU");
    }

    #[test]
    fn test_parse_response_empty_content() {
        let text = RemoteTranscriber::parse_response(r#"{"content": []}"#).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_parse_response_malformed() {
        let result = RemoteTranscriber::parse_response("not json");
        assert!(matches!(
            result,
            Err(TranscriptionError::RecognitionFailed(_))
        ));
    }

    #[test]
    fn test_classify_429_as_quota() {
        let err =
            RemoteTranscriber::classify_failure(reqwest::StatusCode::TOO_MANY_REQUESTS, "{}");
        assert!(matches!(err, TranscriptionError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_billing_error_as_quota() {
        let body = r#"{"error": {"type": "billing_error", "message": "credit exhausted"}}"#;
        let err = RemoteTranscriber::classify_failure(reqwest::StatusCode::FORBIDDEN, body);
        assert!(matches!(err, TranscriptionError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_other_failures_generic() {
        let body = r#"{"error": {"type": "invalid_request_error"}}"#;
        let err = RemoteTranscriber::classify_failure(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, TranscriptionError::RecognitionFailed(_)));

        let err =
            RemoteTranscriber::classify_failure(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(err, TranscriptionError::RecognitionFailed(_)));
    }

    #[test]
    fn test_media_type_sniffing() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(RemoteTranscriber::media_type(png), "image/png");
        assert_eq!(RemoteTranscriber::media_type(b"garbage"), "image/jpeg");
    }
}
