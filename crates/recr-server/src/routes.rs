//! API route definitions.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the service router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/receipts", post(handlers::scan_receipt))
        .route("/healthz", get(handlers::healthz))
        .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
