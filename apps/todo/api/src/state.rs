//! Shared application state.

/// Cloned into each router; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
