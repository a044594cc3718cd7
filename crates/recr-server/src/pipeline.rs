//! Pipeline orchestration: image bytes -> transcription -> field extraction.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use recr_core::{Currency, ReceiptParser, ReceiptRecord, Transcriber, TranscriptionError};

/// What the upload handler found in the request body.
#[derive(Debug)]
pub enum ImageUpload {
    /// A non-empty file part.
    Present(Vec<u8>),
    /// The body carried no file part at all.
    Missing,
    /// A file part was there but could not be read.
    Unreadable,
}

/// Machine-readable outcome codes for the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanCode {
    /// No image payload was supplied; the pipeline was not run.
    #[serde(rename = "NOFILE")]
    NoFile,

    /// The recognition service refused due to account or billing limits.
    #[serde(rename = "QUOTA")]
    Quota,

    /// Any other recognition failure.
    #[serde(rename = "ERROR")]
    Error,
}

/// Response envelope.
///
/// Success carries exactly the three public fields; the diagnostic matched
/// line never appears here. Error messages are generic - service error
/// detail stays in the log.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanResponse {
    Ok {
        ok: bool,
        merchant: String,
        // Callers expect a JSON number, not the decimal's string form.
        #[serde(with = "rust_decimal::serde::float")]
        amount: Decimal,
        currency: Currency,
    },
    Err {
        ok: bool,
        code: ScanCode,
        message: &'static str,
    },
}

impl ScanResponse {
    fn success(record: ReceiptRecord) -> Self {
        ScanResponse::Ok {
            ok: true,
            merchant: record.merchant,
            amount: record.amount,
            currency: record.currency,
        }
    }

    fn failure(code: ScanCode, message: &'static str) -> Self {
        ScanResponse::Err {
            ok: false,
            code,
            message,
        }
    }
}

/// Run the full pipeline for one upload.
pub async fn scan_receipt(
    upload: ImageUpload,
    transcriber: &dyn Transcriber,
    parser: &ReceiptParser,
) -> ScanResponse {
    let image = match upload {
        ImageUpload::Present(bytes) => bytes,
        ImageUpload::Missing => {
            return ScanResponse::failure(ScanCode::NoFile, "no receipt image supplied");
        }
        ImageUpload::Unreadable => {
            return ScanResponse::failure(ScanCode::Error, "unreadable upload");
        }
    };

    let text = match transcriber.transcribe(&image).await {
        Ok(text) => text,
        Err(e @ TranscriptionError::QuotaExceeded(_)) => {
            error!("transcription quota exhausted: {}", e);
            return ScanResponse::failure(ScanCode::Quota, "recognition quota exceeded");
        }
        Err(e) => {
            error!("transcription failed: {}", e);
            return ScanResponse::failure(ScanCode::Error, "recognition failed");
        }
    };

    let extraction = parser.parse(&text);
    info!(merchant = %extraction.record.merchant, "receipt scanned");
    ScanResponse::success(extraction.record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct FixedTranscriber(&'static str);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _image: &[u8]) -> Result<String, TranscriptionError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTranscriber(fn() -> TranscriptionError);

    #[async_trait]
    impl Transcriber for FailingTranscriber {
        async fn transcribe(&self, _image: &[u8]) -> Result<String, TranscriptionError> {
            Err((self.0)())
        }
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let transcriber = FixedTranscriber("STORE NAME\nTOTAL: SGD 23.50");
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Present(b"img".to_vec()), &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["merchant"], "STORE NAME");
        assert_eq!(json["currency"], "SGD");
        // Amount crosses the boundary as a JSON number, not a decimal string.
        assert!(json["amount"].is_number());
        assert_eq!(json["amount"], 23.5);
        // Only the three public fields plus the flag cross the boundary.
        assert!(json.get("matched_line").is_none());
        assert!(json.get("code").is_none());
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_transcription_degrades_to_defaults() {
        let transcriber = FixedTranscriber("");
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Present(b"img".to_vec()), &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["merchant"], "-");
        assert_eq!(json["currency"], "SGD");
        assert_eq!(json["amount"], 0.0);
    }

    #[tokio::test]
    async fn test_missing_file_yields_nofile() {
        let transcriber = FixedTranscriber("never called");
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Missing, &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "NOFILE");
    }

    #[tokio::test]
    async fn test_unreadable_upload_yields_error_code() {
        let transcriber = FixedTranscriber("never called");
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Unreadable, &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        // A truncated or malformed file part is a failure, not a missing file.
        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "ERROR");
        assert_eq!(json["message"], "unreadable upload");
    }

    #[tokio::test]
    async fn test_quota_error_yields_quota_code() {
        let transcriber =
            FailingTranscriber(|| TranscriptionError::QuotaExceeded("429".to_string()));
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Present(b"img".to_vec()), &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "QUOTA");
        // Generic message only; no raw service detail.
        assert_eq!(json["message"], "recognition quota exceeded");
    }

    #[tokio::test]
    async fn test_recognition_failure_yields_error_code() {
        let transcriber = FailingTranscriber(|| {
            TranscriptionError::RecognitionFailed("connection refused".to_string())
        });
        let parser = ReceiptParser::new();

        let response = scan_receipt(ImageUpload::Present(b"img".to_vec()), &transcriber, &parser).await;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "ERROR");
        assert!(!json["message"].as_str().unwrap().contains("connection refused"));
    }
}
