//! Chart Routes
//!
//! - GET /api/v1/charts/:kind - Plotly figure JSON for one dashboard panel
//!
//! `kind` is one of `composition`, `peaks`, `spread` or `world-map`. The
//! first two use the `country` parameter, all of them take `theme`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ChartParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::charts::{
    composition_chart, peaks_chart, spread_chart, world_map, ChartKind, Figure, Theme,
};
use crate::dataset::ObservationTable;
use crate::selection::select;

use super::{parse_theme, resolve_country};

/// GET /api/v1/charts/:kind
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<ChartParams>,
) -> ApiResult<Json<Figure>> {
    let kind: ChartKind = kind.parse().map_err(ApiError::NotFound)?;
    let theme = parse_theme(params.theme.as_deref())?;
    let table = state.table().await?;

    let country = if kind.needs_country() {
        Some(resolve_country(&table, params.country)?)
    } else {
        None
    };

    // The spread figure walks every row of the table
    let figure = tokio::task::spawn_blocking(move || {
        render_chart(kind, &table, country.as_deref(), theme)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Chart task failed: {}", e)))??;

    Ok(Json(figure))
}

fn render_chart(
    kind: ChartKind,
    table: &ObservationTable,
    country: Option<&str>,
    theme: Theme,
) -> ApiResult<Figure> {
    let start = std::time::Instant::now();

    let figure = match kind {
        ChartKind::Composition | ChartKind::Peaks => {
            let country = country
                .ok_or_else(|| ApiError::Validation("country is required".to_string()))?;
            let selection = select(table, country)?;
            if kind == ChartKind::Composition {
                composition_chart(&selection.rows, theme)
            } else {
                peaks_chart(&selection.rows, theme)
            }
        }
        ChartKind::Spread => spread_chart(table, theme),
        ChartKind::WorldMap => world_map(table, theme),
    };

    tracing::debug!(
        chart = kind.slug(),
        theme = %theme,
        frames = figure.frames.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Built chart"
    );

    Ok(figure)
}
