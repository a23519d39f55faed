use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;
pub mod tasks;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/tasks", tasks::router(state))
}

/// `/ready`, which pings the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
