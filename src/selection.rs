//! Filter/Selection Layer
//!
//! Derives, for a chosen country, the date-ordered row subset, the latest
//! country row and the latest "World" row. Missing rows are reported as
//! `DataError::NoRows` instead of indexing into an empty slice.

use crate::dataset::{DataError, DataResult, Observation, ObservationTable, WORLD};

/// Everything the page needs for one country
#[derive(Debug, Clone)]
pub struct Selection {
    pub country: String,
    /// Country rows, date ascending (unknown dates first)
    pub rows: Vec<Observation>,
    /// Last row of `rows`
    pub latest: Observation,
    /// Latest row of the "World" aggregate
    pub world_latest: Observation,
}

/// Rows of one location ordered by date ascending
///
/// The sort is stable, so rows sharing a date keep file order. Rows with an
/// unknown date sort before every dated row.
pub fn country_rows(table: &ObservationTable, location: &str) -> Vec<Observation> {
    let mut rows: Vec<Observation> = table.rows_for(location).cloned().collect();
    rows.sort_by_key(|r| r.date);
    rows
}

/// Latest row of one location
pub fn latest_row(table: &ObservationTable, location: &str) -> DataResult<Observation> {
    table
        .rows_for(location)
        .max_by_key(|r| r.date)
        .cloned()
        .ok_or_else(|| DataError::no_rows(location))
}

/// Select a country and the world aggregate
pub fn select(table: &ObservationTable, country: &str) -> DataResult<Selection> {
    let rows = country_rows(table, country);
    let latest = rows
        .last()
        .cloned()
        .ok_or_else(|| DataError::no_rows(country))?;
    let world_latest = latest_row(table, WORLD)?;

    tracing::debug!(country = %country, rows = rows.len(), "Selected country");

    Ok(Selection {
        country: country.to_string(),
        rows,
        latest,
        world_latest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample_table;
    use crate::dataset::read_observations_str;
    use chrono::NaiveDate;

    #[test]
    fn test_every_location_selects_non_empty_ascending() {
        let table = sample_table();

        for location in table.locations() {
            let selection = select(&table, location).unwrap();
            assert!(!selection.rows.is_empty());
            assert!(selection.rows.windows(2).all(|w| w[0].date <= w[1].date));
            assert_eq!(Some(&selection.latest), selection.rows.last());
        }
    }

    #[test]
    fn test_select_chile() {
        let table = sample_table();
        let selection = select(&table, "Chile").unwrap();

        assert_eq!(selection.rows.len(), 7);
        assert_eq!(selection.rows[0].date, NaiveDate::from_ymd_opt(2021, 3, 1));
        assert_eq!(selection.latest.total_cases, 8700.0);
        assert_eq!(selection.world_latest.total_cases, 150000.0);
    }

    #[test]
    fn test_unknown_dates_sort_first() {
        let table = sample_table();
        let rows = country_rows(&table, "Kosovo");

        assert_eq!(rows[0].date, None);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2021, 3, 6));
    }

    #[test]
    fn test_unknown_country_is_data_unavailable() {
        let table = sample_table();
        let err = select(&table, "Atlantis").unwrap_err();
        assert!(matches!(err, DataError::NoRows { ref location } if location == "Atlantis"));
    }

    #[test]
    fn test_missing_world_is_data_unavailable() {
        let table = read_observations_str(
            "iso_code,location,date,total_cases,new_cases,total_deaths
CHL,Chile,2021-03-01,10,10,0",
        )
        .unwrap();

        let err = select(&table, "Chile").unwrap_err();
        assert!(matches!(err, DataError::NoRows { ref location } if location == WORLD));
    }
}
