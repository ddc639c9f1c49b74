//! Export Routes
//!
//! Download of a country's preprocessed rows.
//!
//! - GET /api/v1/export - Country rows as a CSV attachment

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::CountryParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::{write_observations, DataError};
use crate::selection::country_rows;

use super::resolve_country;

/// GET /api/v1/export
///
/// Rows are date-ordered; unknown dates export as empty cells so the file
/// preprocesses back to the same rows.
pub async fn export_country(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let table = state.table().await?;
    let country = resolve_country(&table, params.country)?;
    let rows = country_rows(&table, &country);
    if rows.is_empty() {
        return Err(DataError::no_rows(&country).into());
    }

    let mut body = Vec::new();
    write_observations(&rows, &mut body)?;

    tracing::info!(country = %country, rows = rows.len(), bytes = body.len(), "Exported rows");

    let disposition = format!("attachment; filename=\"{}\"", export_filename(&country));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        Body::from(body),
    )
        .into_response())
}

/// `epidash_<location>.csv` with the location reduced to `[a-z0-9_]`
fn export_filename(country: &str) -> String {
    let slug: String = country
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("epidash_{}.csv", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Chile"), "epidash_chile.csv");
        assert_eq!(
            export_filename("Côte d'Ivoire"),
            "epidash_c_te_d_ivoire.csv"
        );
    }
}
