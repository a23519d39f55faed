use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations on startup (`RUN_MIGRATIONS`, default `true`)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse_or_default("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
        })
    }
}
