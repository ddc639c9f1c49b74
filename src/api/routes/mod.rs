//! API Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod countries;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod page;

use crate::api::error::{ApiError, ApiResult};
use crate::charts::Theme;
use crate::dataset::{DataError, ObservationTable, WORLD};

/// Requested country, or the first location when none was given
///
/// Unknown names pass through; selection reports them as missing rows. A
/// table without rows cannot serve any country and is reported the same way
/// as a missing World aggregate.
pub(crate) fn resolve_country(table: &ObservationTable, country: Option<String>) -> ApiResult<String> {
    match country {
        Some(c) if c.trim().is_empty() => {
            Err(ApiError::Validation("country must not be empty".to_string()))
        }
        Some(c) => Ok(c),
        None => table
            .locations()
            .first()
            .cloned()
            .ok_or_else(|| DataError::no_rows(WORLD).into()),
    }
}

/// Parse the theme query parameter
pub(crate) fn parse_theme(theme: Option<&str>) -> ApiResult<Theme> {
    match theme {
        None => Ok(Theme::default()),
        Some(s) => s.parse().map_err(ApiError::Validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample_table;

    #[test]
    fn test_resolve_country() {
        let table = sample_table();
        assert_eq!(resolve_country(&table, None).unwrap(), "Chile");
        assert_eq!(
            resolve_country(&table, Some("Kosovo".to_string())).unwrap(),
            "Kosovo"
        );
        assert!(matches!(
            resolve_country(&table, Some("  ".to_string())),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            resolve_country(&ObservationTable::default(), None),
            Err(ApiError::DataUnavailable(DataError::NoRows { .. }))
        ));
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme(None).unwrap(), Theme::PlotlyDark);
        assert_eq!(parse_theme(Some("seaborn")).unwrap(), Theme::Seaborn);
        assert!(matches!(
            parse_theme(Some("solarized")),
            Err(ApiError::Validation(_))
        ));
    }
}
