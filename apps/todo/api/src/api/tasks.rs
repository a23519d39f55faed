use axum::Router;
use domain_tasks::{PgPersonRepository, PgTaskRepository, TaskService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = TaskService::new(
        PgTaskRepository::new(state.db.clone()),
        PgPersonRepository::new(state.db.clone()),
    );
    handlers::router(service)
}
