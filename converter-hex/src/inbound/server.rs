//! HTTP Server configuration and startup.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use converter_types::RateSource;

use super::handlers::{self, AppState, internal_error_body};
use crate::CurrencyConversionService;

/// Knobs for the HTTP adapter, derived from process configuration.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// `*` for any origin, or a comma-separated list of origins.
    pub cors_origin: String,
    /// Include diagnostic detail in 500 responses. Off in production.
    pub expose_error_details: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            cors_origin: "*".to_string(),
            expose_error_details: false,
        }
    }
}

/// HTTP Server for the Currency Converter API.
pub struct HttpServer<S: RateSource> {
    state: Arc<AppState<S>>,
    cors_origin: String,
}

impl<S: RateSource> HttpServer<S> {
    /// Creates a new HTTP server with default options.
    pub fn new(service: CurrencyConversionService<S>) -> Self {
        Self::with_options(service, ServerOptions::default())
    }

    /// Creates a new HTTP server with explicit options.
    pub fn with_options(service: CurrencyConversionService<S>, options: ServerOptions) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                expose_error_details: options.expose_error_details,
            }),
            cors_origin: options.cors_origin,
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let expose_details = self.state.expose_error_details;

        let api = Router::new()
            .route("/health", get(handlers::health))
            .route("/currencies", get(handlers::currencies::<S>))
            .route("/convert", get(handlers::convert::<S>))
            .route("/openapi.json", get(handlers::openapi_json));

        Router::new()
            .route("/", get(handlers::root))
            .nest("/api", api)
            .fallback(handlers::not_found)
            .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
                panic_response(panic, expose_details)
            }))
            .layer(cors_layer(&self.cors_origin))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already-bound listener with graceful shutdown.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origin.trim() == "*" {
        return layer.allow_origin(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = origin
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Handler panicked: {}", detail);

    let body = internal_error_body();
    let body = if expose_details {
        body.with_detail(detail)
    } else {
        body
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
