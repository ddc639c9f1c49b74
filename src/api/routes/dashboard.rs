//! Dashboard Routes
//!
//! Headline numbers and detected waves for the selected country.
//!
//! - GET /api/v1/summary - World and country metrics with the flag URL
//! - GET /api/v1/peaks - Detected peaks of daily new cases

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CountryParams, PeaksResponse, SummaryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::charts::detect_waves;
use crate::metrics::{country_metrics, world_metrics};
use crate::selection::select;
use crate::signal::PEAK_HEIGHT;

use super::resolve_country;

/// GET /api/v1/summary
///
/// Fails with LOCATION_NOT_FOUND for an unknown country and with
/// DATA_UNAVAILABLE when the World aggregate is missing.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> ApiResult<Json<SummaryResponse>> {
    let table = state.table().await?;
    let country = resolve_country(&table, params.country)?;
    let selection = select(&table, &country)?;
    let flag_url = state.flags.flag_url(&table, &country);

    Ok(Json(SummaryResponse {
        latest_date: selection.latest.date,
        world: world_metrics(&selection.world_latest),
        metrics: country_metrics(&selection.latest),
        flag_url,
        country,
    }))
}

/// GET /api/v1/peaks
pub async fn get_peaks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> ApiResult<Json<PeaksResponse>> {
    let table = state.table().await?;
    let country = resolve_country(&table, params.country)?;
    let selection = select(&table, &country)?;

    Ok(Json(PeaksResponse {
        threshold: PEAK_HEIGHT,
        peaks: detect_waves(&selection.rows),
        country,
    }))
}
