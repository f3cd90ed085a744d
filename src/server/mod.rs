//! HTTP service
//!
//! Exposes the crawler over a small JSON API:
//!
//! - `POST /analyze` - search postings for `{ "query": ... }`
//! - `GET /alljobs` - list current postings
//! - `GET /health` - liveness

pub mod api;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::crawler::GazetteCrawler;
use crate::error::{Error, Result};

pub use api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub crawler: Arc<GazetteCrawler>,
}

impl AppState {
    pub fn new(crawler: GazetteCrawler) -> Self {
        Self {
            crawler: Arc::new(crawler),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// Router with API routes and configured middleware
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = create_router(state);

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown_signal` resolves
pub async fn serve(
    state: AppState,
    config: &ServerConfig,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let router = build_router(state, config);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::with_source(format!("Failed to bind {addr}"), e))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| Error::with_source("Server error", e))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C
pub async fn ctrl_c_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to wait for Ctrl+C: {}", e),
    }
}
