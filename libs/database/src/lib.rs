//! Database connectivity for the todo workspace.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL through SeaORM
//! - `config` - `core_config::FromEnv` support for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "todo_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
