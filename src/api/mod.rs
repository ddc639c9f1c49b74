//! epidash HTTP API
//!
//! Dashboard page and JSON API, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard shell
//!
//! ## Selectors
//! - `GET /api/v1/countries` - Distinct locations
//! - `GET /api/v1/themes` - Graph styles
//!
//! ## Dashboard
//! - `GET /api/v1/summary?country=` - World and country metrics, flag URL
//! - `GET /api/v1/peaks?country=` - Detected waves
//! - `GET /api/v1/charts/:kind?country=&theme=` - Plotly figure JSON
//!
//! ## Export
//! - `GET /api/v1/export?country=` - Country rows as CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use epidash::api::{serve, ApiConfig, AppState};
//! use epidash::countries::FlagResolver;
//! use epidash::dataset::DatasetCache;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(DatasetCache::new("owid-covid-data.csv"));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, FlagResolver::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Selector routes
        .route("/countries", get(routes::countries::list_countries))
        .route("/themes", get(routes::countries::list_themes))
        // Dashboard routes
        .route("/summary", get(routes::dashboard::get_summary))
        .route("/peaks", get(routes::dashboard::get_peaks))
        .route("/charts/:kind", get(routes::charts::get_chart))
        // Export routes
        .route("/export", get(routes::export::export_country));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("epidash listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("epidash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
