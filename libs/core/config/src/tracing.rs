use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre for colored error reports with file locations.
///
/// Call this first in `main()`. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global tracing subscriber.
///
/// - Production: flattened JSON events, default filter `info,sea_orm=warn`.
/// - Development: pretty output, default filter `debug,sea_orm=info`.
///
/// `RUST_LOG` overrides the default filter. Both modes include
/// [`tracing_error::ErrorLayer`] so eyre reports carry span traces.
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info,sea_orm=warn,sqlx=warn")
        } else {
            EnvFilter::new("debug,sea_orm=info,sqlx=info")
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping"),
    }
}
