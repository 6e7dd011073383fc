use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::security::security_headers;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

const CORS_ENV: &str = "CORS_ALLOWED_ORIGIN";
const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Wrap `apis` (mounted at `/api`) with docs, fallbacks and the shared middleware stack.
///
/// Docs are served at `/swagger-ui`, `/redoc`, `/rapidoc` and `/scalar`, all
/// backed by `/api-docs/openapi.json`. Unmatched paths and methods get JSON
/// error bodies. Health and readiness routes are merged in by the binary.
///
/// `CORS_ALLOWED_ORIGIN` must list one or more comma-separated origins;
/// a missing, empty or unparsable value is an [`io::ErrorKind::InvalidInput`] error.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let raw_origins = std::env::var(CORS_ENV)
        .map_err(|_| invalid_input(format!("{CORS_ENV} must be set, e.g. http://localhost:3000")))?;
    let cors = cors_layer(&raw_origins)?;
    info!(origins = %raw_origins, "CORS enabled");

    Ok(docs_router::<T>()
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new()))
}

fn docs_router<T: OpenApi>() -> Router {
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as _};
    use utoipa_scalar::{Scalar, Servable as _};
    use utoipa_swagger_ui::SwaggerUi;

    let openapi = T::openapi();
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON, openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi.clone()))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", openapi))
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| invalid_input(format!("{CORS_ENV} has invalid origin {origin:?}: {e}")))
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(invalid_input(format!("{CORS_ENV} lists no origins")));
    }
    Ok(origins)
}

fn cors_layer(raw: &str) -> io::Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(raw)?))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests drain before `cleanup` starts; `cleanup` itself is
/// abandoned after `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     db.close().await.ok();
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
    let listener = tokio::net::TcpListener::bind(server_config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    let (coordinator, _) = ShutdownCoordinator::new();
    let signals = coordinator.clone();

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signals.wait_for_signal().await })
        .await;
    if let Err(e) = &served {
        tracing::error!(error = %e, "Server stopped with an error");
    }

    // Reached on a clean drain or a serve error; clean up in both cases
    coordinator.shutdown();
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup finished"),
        Err(_) => warn!(timeout = ?shutdown_timeout, "Cleanup timed out"),
    }

    served
}
