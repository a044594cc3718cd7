//! Transcription adapter: turns image bytes into plain text via an
//! external vision-capable recognition service.

mod remote;

pub use remote::RemoteTranscriber;

use async_trait::async_trait;

use crate::error::TranscriptionError;

/// Trait for transcription providers.
///
/// Implementations may return empty, partial or noisy text; the field
/// extractor treats any returned string as valid (degraded) input.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Best-effort transcription of all readable characters in the image.
    async fn transcribe(&self, image: &[u8]) -> Result<String, TranscriptionError>;
}
