use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a connection pool using `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// [`connect_from_config`] with exponential backoff.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let attempt = || connect_from_config(config.clone());

    let db = match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await?,
        None => retry(attempt).await?,
    };

    Ok(db)
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!(app = app_name, "Migrations applied");
    Ok(())
}
