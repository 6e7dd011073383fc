//! Readiness check backed by a real PostgreSQL query.

use crate::state::AppState;
use axum::extract::State;
use axum_helpers::server::{HealthCheckFuture, ReadinessReport, run_health_checks};

pub async fn ready_handler(State(state): State<AppState>) -> ReadinessReport {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
