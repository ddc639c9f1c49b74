//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::countries::FlagResolver;
use crate::dataset::{DatasetCache, ObservationTable};
use std::sync::Arc;
use std::time::Instant;

use super::error::ApiResult;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Memoized observation table, loaded on first access
    pub dataset: Arc<DatasetCache>,
    /// Builds flag image URLs for the country block
    pub flags: Arc<FlagResolver>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<DatasetCache>, flags: FlagResolver, config: ApiConfig) -> Self {
        Self {
            dataset,
            flags: Arc::new(flags),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// The shared table, loading it if this is the first access
    pub async fn table(&self) -> ApiResult<Arc<ObservationTable>> {
        Ok(self.dataset.get().await?)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable the CSV export endpoint
    pub enable_export: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            enable_export: true,
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
