pub mod experiments;
pub mod notifications;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::state::AppState;

/// Build the axum Router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/experiments", get(experiments::list_experiments))
        .route("/api/experiments", post(experiments::create_experiment))
        .route("/api/experiments/{id}", put(experiments::update_experiment))
        .route(
            "/api/experiments/{id}",
            delete(experiments::delete_experiment),
        )
        .route(
            "/api/notifications/test",
            post(notifications::test_notification),
        )
        .with_state(state)
}
