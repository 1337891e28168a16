pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::timeline::handlers as timeline;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Timeline API
        .route(
            "/api/v1/experiences",
            get(timeline::handle_list_experiences).post(timeline::handle_add_experience),
        )
        .route(
            "/api/v1/experiences/:id",
            axum::routing::patch(timeline::handle_update_experience)
                .delete(timeline::handle_remove_experience),
        )
        // Generation API
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/session", get(generation::handle_session))
        .route("/api/v1/reset", post(generation::handle_reset))
        .with_state(state)
}
