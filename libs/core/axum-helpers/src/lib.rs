//! # Axum Helpers
//!
//! Shared building blocks for the todo HTTP services.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health endpoints, graceful shutdown
//! - **[`http`]**: response middleware (security headers)
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] body
//! - **[`extractors`]**: [`UuidPath`] and [`ValidatedJson`]

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::security_headers;

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
