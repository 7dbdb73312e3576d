use crate::errors::handlers::{error_route, not_found};
use crate::errors::{FailureTranslator, panic_failure, translate_failures};
use crate::http::{CorsOrigins, create_cors_layer, security_headers};
use super::shutdown::ShutdownCoordinator;
use axum::{Router, http::StatusCode, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Cross-cutting settings applied by [`create_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Serve ReDoc, RapiDoc, Scalar and `/api-docs/openapi.json`
    pub docs_enabled: bool,
    pub cors_origins: CorsOrigins,
    /// Whole-request deadline; expiry answers 408
    pub request_timeout: Duration,
    /// How uncaught failures are rendered
    pub failures: FailureTranslator,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            docs_enabled: false,
            cors_origins: CorsOrigins::Any,
            request_timeout: Duration::from_secs(30),
            failures: FailureTranslator::default(),
        }
    }
}

/// Creates the application router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (ReDoc, RapiDoc, Scalar) when enabled
/// - API routes nested under `/api`
/// - The `/error` route and a 404 fallback
/// - Panic capture and failure translation
/// - Request timeout, tracing, security headers, CORS and compression
///
/// Health endpoints are merged by the app with [`health_router`](super::health_router).
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", products::router(service));
/// let router = create_router::<ApiDoc>(api_routes, &RouterOptions::default());
/// ```
pub fn create_router<T>(apis: Router, options: &RouterOptions) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    let mut router = Router::new();
    if options.docs_enabled {
        router = router
            .merge(Redoc::with_url("/redoc", T::openapi()))
            .merge(RapiDoc::with_openapi("/api-docs/openapi.json", T::openapi()).path("/rapidoc"))
            .merge(Scalar::with_url("/scalar", T::openapi()));
    }

    info!(
        docs = options.docs_enabled,
        timeout = ?options.request_timeout,
        strategy = %options.failures.strategy,
        "Router configured"
    );

    router
        .route("/error", get(error_route))
        .nest("/api", apis)
        .fallback(not_found)
        // Innermost: panics become failures before the translator sees them
        .layer(CatchPanicLayer::custom(panic_failure))
        .layer(middleware::from_fn_with_state(
            options.failures.clone(),
            translate_failures,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            options.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(&options.cors_origins))
        // gzip, br, deflate, zstd based on Accept-Encoding
        .layer(CompressionLayer::new())
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// Serves with client socket addresses attached (`ConnectInfo<SocketAddr>`),
/// stops accepting on SIGINT/SIGTERM, then runs `cleanup` bounded by
/// `server_config.shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config.server, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
    .await
    .inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    });

    cleanup_handle.await.ok();

    serve_result
}
