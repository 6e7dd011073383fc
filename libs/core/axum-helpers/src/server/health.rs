//! `/health` (liveness) and the building blocks for `/ready` (readiness).

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// One dependency probe; `Err` carries a message for the logs.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Connected,
    Disconnected,
}

/// Outcome of [`run_health_checks`]: 200 when every probe passed, 503 otherwise.
///
/// Serializes as `{"status": "ready" | "not ready", "<check>": "connected" | "disconnected", ...}`.
#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    status: &'static str,
    #[serde(flatten)]
    checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.checks.values().all(|s| *s == CheckStatus::Connected)
    }

    pub fn check(&self, name: &str) -> Option<CheckStatus> {
        self.checks.get(name).copied()
    }
}

impl IntoResponse for ReadinessReport {
    fn into_response(self) -> Response {
        let status = if self.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

/// Run every probe concurrently.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![(
///     "database",
///     Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await.into_response()
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> ReadinessReport {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let outcomes = join_all(probes).await;

    let checks: BTreeMap<String, CheckStatus> = names
        .into_iter()
        .zip(outcomes)
        .map(|(name, outcome)| {
            let status = match outcome {
                Ok(()) => CheckStatus::Connected,
                Err(e) => {
                    tracing::error!(check = name, error = %e, "Readiness check failed");
                    CheckStatus::Disconnected
                }
            };
            (name.to_owned(), status)
        })
        .collect();

    let ready = checks.values().all(|s| *s == CheckStatus::Connected);
    ReadinessReport {
        status: if ready { "ready" } else { "not ready" },
        checks,
    }
}

async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// `GET /health`, always 200 while the process serves requests.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
