use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // color-eyre goes first so every later failure gets a report
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    // /health: liveness with name and version; /ready: database ping
    let probes = health_router(state.config.app).merge(api::ready_router(state.clone()));
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, probes)?;

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting todo API"
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(()) => info!("PostgreSQL connection closed"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}
