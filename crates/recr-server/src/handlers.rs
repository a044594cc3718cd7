//! HTTP handlers: thin plumbing around the extraction pipeline.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::warn;

use crate::pipeline::{self, ImageUpload, ScanResponse};
use crate::AppState;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// `POST /api/receipts` - multipart receipt upload.
///
/// Always replies with transport status 200; the outcome is carried by the
/// `ok` flag and a machine-readable `code`, so callers can distinguish
/// "no result" from transport failure.
pub async fn scan_receipt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Json<ScanResponse> {
    let upload = read_file_part(&mut multipart).await;
    let response =
        pipeline::scan_receipt(upload, state.transcriber.as_ref(), &state.parser).await;
    Json(response)
}

/// First non-empty file part of the upload. A part that is present but
/// fails mid-read is reported as unreadable, not as absent.
async fn read_file_part(multipart: &mut Multipart) -> ImageUpload {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.file_name().is_none() {
                    continue;
                }
                match field.bytes().await {
                    Ok(bytes) if !bytes.is_empty() => return ImageUpload::Present(bytes.to_vec()),
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("failed to read upload part: {}", e);
                        return ImageUpload::Unreadable;
                    }
                }
            }
            Ok(None) => return ImageUpload::Missing,
            Err(e) => {
                warn!("malformed multipart body: {}", e);
                return ImageUpload::Unreadable;
            }
        }
    }
}

/// `GET /healthz` - liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
