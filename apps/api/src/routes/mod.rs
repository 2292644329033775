pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::qa::handlers as qa;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/upload",
            post(candidates::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/candidates", get(candidates::handle_list_candidates))
        .route("/api/v1/candidate/:id", get(candidates::handle_get_candidate))
        .route("/api/v1/ask/:id", post(qa::handle_ask))
        .with_state(state)
}
