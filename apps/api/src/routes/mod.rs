pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::state::AppState;

/// Headroom for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // CV auto-fill API
        .route("/api/v1/cv/parse", post(handlers::handle_parse_cv))
        .route(
            "/api/v1/cv/suggest-skills",
            post(handlers::handle_suggest_skills),
        )
        .route("/api/v1/cv/prefill", post(handlers::handle_prefill))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
