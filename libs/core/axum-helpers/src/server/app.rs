use super::shutdown::ShutdownCoordinator;
use crate::errors::not_found;
use crate::http::security::security_headers;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

const CORS_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// Build a CORS layer from a comma-separated origin list.
///
/// Blank entries are skipped; an empty list is rejected.
pub fn cors_layer(origins: &str) -> io::Result<CorsLayer> {
    let allowed = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ENV, e),
            )
        })?;

    if allowed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ENV),
        ));
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Wrap domain routes with docs and the shared middleware stack.
///
/// `apis` is nested under `/api`; `root` (health probes and the like) is
/// mounted as is. Both sit behind the same layers. The OpenAPI document of `T` is served at
/// `/api-docs/openapi.json` and rendered by Swagger UI (`/swagger-ui`),
/// ReDoc (`/redoc`), RapiDoc (`/rapidoc`) and Scalar (`/scalar`). Unknown
/// paths get the JSON 404 body.
///
/// # Errors
///
/// Fails when `CORS_ALLOWED_ORIGIN` is unset, empty or not a valid header
/// value.
pub fn create_router<T>(apis: Router, root: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let origins = std::env::var(CORS_ENV).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} environment variable is required, e.g. http://localhost:3000",
                CORS_ENV
            ),
        )
    })?;
    let cors = cors_layer(&origins)?;
    info!("CORS configured with allowed origins: {}", origins);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .merge(root)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within
/// `shutdown_timeout`.
///
/// ```ignore
/// let db = state.db.clone();
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     let _ = db.close().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        signal_handle.wait_for_signal().await;

        info!("Running cleanup (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed"),
            Err(_) => warn!("Cleanup exceeded {:?}, forcing shutdown", shutdown_timeout),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| tracing::error!("Server error: {:?}", e));

    if let Err(e) = cleanup_handle.await {
        warn!("Cleanup task failed: {}", e);
    }

    serve_result
}
