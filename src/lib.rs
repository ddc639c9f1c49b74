//! # epidash
//!
//! COVID-19 dashboard over an Our World in Data export: world and country
//! headline numbers, wave detection, and animated world maps, served as a
//! single web page backed by a JSON API.
//!
//! ## Features
//!
//! - **Load once**: the CSV is parsed and cleaned on first access, then shared
//! - **Country view**: totals, case-fatality ratio and flag for any location
//! - **Wave detection**: peaks of daily new cases above a fixed height
//! - **World view**: animated spread over time and a latest-date choropleth
//! - **Themes**: five Plotly graph styles
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading, preprocessing and the memoized table
//! - [`countries`]: ISO alpha-3 to alpha-2 lookup and flag URLs
//! - [`selection`]: per-country row subsets and latest rows
//! - [`metrics`]: headline numbers and CFR
//! - [`signal`]: peak detection
//! - [`charts`]: Plotly figure builders
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use epidash::charts::{peaks_chart, Theme};
//! use epidash::dataset::load_observations;
//! use epidash::selection::select;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_observations(Path::new("owid-covid-data.csv"))?;
//!     println!("Loaded {}", table.stats());
//!
//!     let chile = select(&table, "Chile")?;
//!     let figure = peaks_chart(&chile.rows, Theme::PlotlyDark);
//!     println!("{}", serde_json::to_string(&figure)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod countries;
pub mod dataset;
pub mod metrics;
pub mod selection;
pub mod signal;

// Re-export top-level types for convenience
pub use dataset::{
    DataError, DataResult, DatasetCache, Observation, ObservationTable, TableStats, WORLD,
};

pub use charts::{ChartKind, Figure, PeakPoint, Theme};

pub use countries::FlagResolver;

pub use metrics::{CaseFatality, MetricValue};

pub use selection::Selection;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    ApiConfig as ConfigApiConfig, Config, ConfigError, DatasetConfig, LoggingConfig,
};
