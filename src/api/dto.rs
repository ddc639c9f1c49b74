//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::charts::{PeakPoint, Theme};
use crate::metrics::MetricValue;

// ============================================
// REQUEST PARAMS
// ============================================

/// Query parameters naming a country
#[derive(Debug, Default, Deserialize)]
pub struct CountryParams {
    /// Location name, defaults to the first location in the table
    #[serde(default)]
    pub country: Option<String>,
}

/// Query parameters for chart endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    /// Ignored by the world charts
    #[serde(default)]
    pub country: Option<String>,
    /// One of the theme names, defaults to plotly_dark
    #[serde(default)]
    pub theme: Option<String>,
}

// ============================================
// LOOKUP DTOs
// ============================================

/// Country selector options
#[derive(Debug, Serialize, Deserialize)]
pub struct CountryListResponse {
    /// Distinct locations in first-appearance order
    pub countries: Vec<String>,
    pub total: usize,
    /// Preselected option
    pub default: Option<String>,
}

/// Graph style selector options
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeListResponse {
    pub themes: Vec<Theme>,
    pub default: Theme,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Global and country headline numbers
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub country: String,
    /// Date of the latest country row
    pub latest_date: Option<NaiveDate>,
    /// Total cases and deaths of the World aggregate
    pub world: Vec<MetricValue>,
    /// Total cases, deaths and CFR of the country
    pub metrics: Vec<MetricValue>,
    /// Flag image, absent when the ISO code has no alpha-2 counterpart
    pub flag_url: Option<String>,
}

/// Detected waves of a country
#[derive(Debug, Serialize)]
pub struct PeaksResponse {
    pub country: String,
    /// Minimum peak height in new cases
    pub threshold: f64,
    pub peaks: Vec<PeakPoint>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Dataset status: loaded or error
    pub dataset: String,
    /// Rows in the loaded table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
