//! Router bootstrap, liveness/readiness, and the serve loop with graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{
    CheckStatus, HealthCheckFuture, HealthResponse, ReadinessReport, health_router, run_health_checks,
};
pub use shutdown::ShutdownCoordinator;
