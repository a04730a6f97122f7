//! Application startup and lifecycle management.
//!
//! Builds the two upstream handles from validated configuration, wires the
//! router, and serves until a shutdown signal arrives.

use crate::config::GatewayConfig;
use crate::handlers;
use crate::services::datastore::supabase::{SupabaseClient, SupabaseClientConfig};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::{DataStore, TextProvider};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{request_id_middleware, RequestId},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Code payloads can be whole files.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state. Both handles are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
    pub data_store: Arc<dyn DataStore>,
    pub probe_table: String,
}

impl AppState {
    /// Construct the Gemini and Supabase handles. Any failure is fatal.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, AppError> {
        let text_provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Gemini client: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");

        let data_store = SupabaseClient::new(SupabaseClientConfig {
            url: config.supabase.url.clone(),
            service_role_key: config.supabase.service_role_key.clone(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Supabase client: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        tracing::info!(url = %config.supabase.url, "Initialized Supabase client");

        Ok(Self {
            text_provider: Arc::new(text_provider),
            data_store: Arc::new(data_store),
            probe_table: config.supabase.probe_table.clone(),
        })
    }
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/test", get(handlers::api_test))
        .route("/api/supabase-test", get(handlers::supabase_test))
        .route("/api/gemini-test", post(handlers::gemini_test))
        .route("/api/code-review", post(handlers::code_review))
        .route_layer(from_fn(metrics_middleware))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.0.as_str())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from validated configuration.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::build_with_state(config.common.port, state).await
    }

    /// Bind the listener and wire `state` into the router (port 0 = random
    /// port for testing).
    pub async fn build_with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Code review gateway listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
