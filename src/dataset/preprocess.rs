//! Preprocessing
//!
//! Turns raw CSV rows into observations: the date column is coerced to a
//! calendar date and every missing value is replaced with zero (numbers) or
//! an empty string (text). Runs exactly once, inside the loader.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::types::{Observation, ObservationTable, RawObservation};

/// Date layouts tried in order; the first is the one the OWID export uses
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date cell, returning `None` for anything unrecognised
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Preprocess raw rows into the observation table
pub fn preprocess(raw: Vec<RawObservation>) -> ObservationTable {
    let rows: Vec<Observation> = raw.into_iter().map(normalize).collect();

    let unknown = rows.iter().filter(|r| r.date.is_none()).count();
    if unknown > 0 {
        tracing::debug!(unknown_dates = unknown, "Rows with unparseable dates kept as unknown");
    }

    ObservationTable::new(rows)
}

fn normalize(raw: RawObservation) -> Observation {
    Observation {
        location: raw.location.unwrap_or_default(),
        iso_code: raw.iso_code.unwrap_or_default(),
        date: raw.date.as_deref().and_then(parse_date),
        total_cases: fill(raw.total_cases),
        new_cases: fill(raw.new_cases),
        total_deaths: fill(raw.total_deaths),
    }
}

/// Missing and NaN cells both count as absent
fn fill(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 1);
        assert_eq!(parse_date("2021-03-01"), expected);
        assert_eq!(parse_date("2021/03/01"), expected);
        assert_eq!(parse_date("03/01/2021"), expected);
        assert_eq!(parse_date("2021-03-01 10:00:00"), expected);
        assert_eq!(parse_date("2021-03-01T10:00:00+00:00"), expected);
    }

    #[test]
    fn test_parse_date_unknown() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2021-13-45"), None);
    }

    #[test]
    fn test_missing_values_are_zero_filled() {
        let table = preprocess(vec![RawObservation {
            location: Some("Chile".to_string()),
            iso_code: None,
            date: Some("garbage".to_string()),
            total_cases: Some(f64::NAN),
            new_cases: None,
            total_deaths: Some(4.0),
        }]);

        let row = &table.rows()[0];
        assert_eq!(row.iso_code, "");
        assert_eq!(row.date, None);
        assert_eq!(row.total_cases, 0.0);
        assert_eq!(row.new_cases, 0.0);
        assert_eq!(row.total_deaths, 4.0);
    }

    #[test]
    fn test_empty_input() {
        let table = preprocess(Vec::new());
        assert!(table.is_empty());
        assert!(table.locations().is_empty());
    }
}
