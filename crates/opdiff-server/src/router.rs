use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all opdiff endpoints.
pub fn build_router(state: AppState, max_request_body: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/diff/:id/left", post(handler::left_handler))
        .route("/v1/diff/:id/right", post(handler::right_handler))
        .route("/v1/diff/:id", get(handler::diff_handler))
        .layer(DefaultBodyLimit::max(max_request_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
