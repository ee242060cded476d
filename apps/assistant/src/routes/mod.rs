pub mod handlers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/classify", post(handlers::handle_classify))
        .route("/api/profile", get(handlers::handle_get_profile))
        .route("/api/jobs/search", post(handlers::handle_search_jobs))
        .with_state(state)
}
