pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_templates))
        .route(
            "/api/v1/templates/:id/generate",
            post(handlers::handle_generate_from_template),
        )
        .route("/api/v1/plans/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/plans/current",
            get(handlers::handle_current).delete(handlers::handle_clear),
        )
        .route(
            "/api/v1/plans/current/text",
            get(handlers::handle_current_text),
        )
        .route(
            "/api/v1/plans/export",
            post(export::handlers::handle_export),
        )
        .with_state(state)
}
