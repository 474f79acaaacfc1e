//! Router assembly and HTTP server with graceful shutdown

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::{Error, Result},
    handlers::{self, create_user, delete_user, get_user, list_users},
    health,
    middleware::{request_id_layer, request_id_propagation_layer, sensitive_headers_layer},
    openapi::{openapi_json, OPENAPI_PATH},
    repository::UserRepository,
    state::AppState,
};

/// Routes of the service with state applied, without middleware
pub fn build_router<R>(state: AppState<R>) -> Router
where
    R: UserRepository,
{
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health::<R>))
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route("/users/{user_id}", get(get_user::<R>).delete(delete_user::<R>))
        .route(OPENAPI_PATH, get(openapi_json::<R>))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
}

/// Routes plus the configured middleware stack, ready to serve
pub fn app<R>(state: AppState<R>) -> Router
where
    R: UserRepository,
{
    let config = state.config().clone();
    apply_middleware(build_router(state), &config)
}

/// Wrap a router in the middleware stack
///
/// Layers added later wrap the earlier ones, so the last `.layer` call is
/// the outermost and sees the request first.
pub fn apply_middleware(app: Router, config: &Config) -> Router {
    let body_limit = config.body_limit_bytes();

    // Panic recovery (innermost)
    let app = if config.middleware.catch_panic {
        app.layer(CatchPanicLayer::custom(panic_response))
    } else {
        app
    };

    let app = app
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        // Request tracking wraps tracing so spans carry the id and masked headers
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(request_id_propagation_layer())
                .layer(sensitive_headers_layer()),
        )
        // Request body size limit
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        // Request timeout
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.timeout(),
        ))
        .layer(CompressionLayer::new().gzip(config.middleware.compression));

    // CORS (outermost)
    match build_cors_layer(config) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Build CORS layer based on configuration
fn build_cors_layer(config: &Config) -> Option<CorsLayer> {
    match config.middleware.cors_mode.as_str() {
        "permissive" => {
            tracing::debug!("Enabling permissive CORS");
            Some(CorsLayer::permissive())
        }
        "restrictive" => {
            tracing::debug!("Enabling restrictive CORS (default deny)");
            Some(CorsLayer::new())
        }
        "disabled" => {
            tracing::debug!("CORS disabled");
            None
        }
        other => {
            tracing::warn!("Unknown CORS mode: {}, defaulting to permissive", other);
            Some(CorsLayer::permissive())
        }
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    Error::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind the configured address and serve `app` until SIGINT/SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_listener(listener, app).await
    }

    /// Serve on an already bound listener until SIGINT/SIGTERM
    ///
    /// `app` is wrapped in the configured middleware stack; pass a router
    /// from [`build_router`], not [`app`].
    pub async fn serve_with_listener(self, listener: TcpListener, app: Router) -> Result<()> {
        let addr = listener.local_addr()?;

        tracing::info!("Starting {} on {}", self.config.service.name, addr);
        self.log_middleware_config();

        let app = apply_middleware(app, &self.config);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log middleware configuration for debugging
    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        tracing::info!("Middleware configuration:");
        tracing::info!(
            "  - Panic recovery: {}",
            if middleware.catch_panic { "enabled" } else { "disabled" }
        );
        tracing::info!("  - Request ID tracking: enabled");
        tracing::info!("  - Sensitive header masking: enabled");
        tracing::info!("  - Request body limit: {} MB", middleware.body_limit_mb);
        tracing::info!(
            "  - Compression: {}",
            if middleware.compression { "enabled" } else { "disabled" }
        );
        tracing::info!("  - CORS mode: {}", middleware.cors_mode);
        tracing::info!(
            "  - Request timeout: {} seconds",
            self.config.service.timeout_secs
        );
        tracing::info!("  - Id strategy: {:?}", self.config.store.id_strategy);
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
