//! Readiness probe backed by a real database ping.

use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}
