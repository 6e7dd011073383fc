//! Process-wide error reporting and log output.

use crate::Environment;
use tracing_subscriber::{EnvFilter, prelude::*};

const PRODUCTION_FILTER: &str = "info,tower_http=info,sea_orm=warn,sqlx=warn";
const DEVELOPMENT_FILTER: &str = "debug,sqlx=info,hyper=info";

/// Install the color-eyre panic and error report hooks.
///
/// Call before anything that can fail in `main`; repeated calls are no-ops.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Install the global subscriber.
///
/// Production emits one flattened JSON object per event; development uses
/// the pretty formatter. Both carry an [`tracing_error::ErrorLayer`] so
/// eyre reports include span traces. `RUST_LOG` replaces the default filter.
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(environment: &Environment) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let installed = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
    installed
}
