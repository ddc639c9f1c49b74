//! Selector Routes
//!
//! Options for the two sidebar selects.
//!
//! - GET /api/v1/countries - Distinct locations
//! - GET /api/v1/themes - Graph styles

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CountryListResponse, ThemeListResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::charts::Theme;

/// GET /api/v1/countries
///
/// Every distinct location, aggregates included, in file order.
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountryListResponse>> {
    let table = state.table().await?;
    let countries = table.locations().to_vec();

    Ok(Json(CountryListResponse {
        total: countries.len(),
        default: countries.first().cloned(),
        countries,
    }))
}

/// GET /api/v1/themes
pub async fn list_themes() -> Json<ThemeListResponse> {
    Json(ThemeListResponse {
        themes: Theme::all().to_vec(),
        default: Theme::default(),
    })
}
