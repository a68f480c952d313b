pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/modes", get(handlers::handle_list_modes))
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyses/:id/follow-up",
            post(handlers::handle_follow_up),
        )
        .route("/api/v1/feedback", post(page::feedback_handler))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
