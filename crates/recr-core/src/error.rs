//! Error types for the recr-core library.

use thiserror::Error;

/// Main error type for the recr library.
#[derive(Error, Debug)]
pub enum RecrError {
    /// Transcription adapter error.
    #[error("transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the external text-recognition service.
///
/// The field extractor itself has no error conditions; absence of a signal
/// degrades to a documented default value instead of failing.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The service refused the request due to account or billing limits.
    /// Reported distinctly so the caller can show a billing-specific message.
    #[error("recognition quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other adapter-level failure (network, malformed response,
    /// unsupported format).
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
}

/// Result type for the recr library.
pub type Result<T> = std::result::Result<T, RecrError>;
