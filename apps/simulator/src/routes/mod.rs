pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        .route("/api/v1/interviews", post(handlers::handle_start_interview))
        .route(
            "/api/v1/interviews/latest",
            get(handlers::handle_latest_interview),
        )
        .with_state(state)
}
