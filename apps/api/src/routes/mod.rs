pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/enhance", post(handlers::handle_enhance))
        .route("/api/v1/match", post(handlers::handle_match))
        .with_state(state)
}
