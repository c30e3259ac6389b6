pub mod health;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::account::handlers as account;
use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless single-platform generation
        .route("/generate-content", post(generation::handle_generate_content))
        .route("/api/stats", get(stats::stats_handler))
        // Generation history
        .route(
            "/api/v1/generations",
            get(history::handle_list_generations).post(generation::handle_create_generations),
        )
        .route(
            "/api/v1/generations/:id",
            get(history::handle_get_generation).delete(history::handle_delete_generation),
        )
        // Account
        .route("/api/v1/users", post(account::handle_sign_in))
        .route(
            "/api/v1/me",
            get(account::handle_get_me)
                .patch(account::handle_update_me)
                .delete(account::handle_delete_me),
        )
        .with_state(state)
}
