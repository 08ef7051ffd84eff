use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::dto::DOWNLOAD_PATH;
use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Upload page
        .route("/", get(handlers::index_page))
        // Conversion
        .route("/api/v1/convert", post(handlers::handle_convert))
        .route(DOWNLOAD_PATH, get(handlers::handle_download))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
