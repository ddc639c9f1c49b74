//! Core data types for the observation table
//!
//! - `RawObservation`: one CSV row exactly as read, every cell optional
//! - `Observation`: a preprocessed row (zero-filled, date coerced)
//! - `ObservationTable`: the full in-memory dataset
//! - `TableStats`: summary used for logging and health reporting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Location name of the synthetic worldwide aggregate row
pub const WORLD: &str = "World";

/// Columns every dataset file must carry
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "location",
    "iso_code",
    "date",
    "total_cases",
    "new_cases",
    "total_deaths",
];

/// A row as it appears in the source file
///
/// Other columns of the file are ignored. Empty cells deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub iso_code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_cases: Option<f64>,
    #[serde(default)]
    pub new_cases: Option<f64>,
    #[serde(default)]
    pub total_deaths: Option<f64>,
}

/// One (location, date) observation after preprocessing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Display name of the location ("Germany", "World", ...)
    pub location: String,
    /// ISO alpha-3 code, or an `OWID_*` code for aggregates
    pub iso_code: String,
    /// Calendar date, `None` when the source value could not be parsed
    pub date: Option<NaiveDate>,
    pub total_cases: f64,
    pub new_cases: f64,
    pub total_deaths: f64,
}

impl Observation {
    /// Rough "recovered" estimate: total cases minus deaths minus today's new cases.
    ///
    /// This is not an epidemiological definition and can go negative.
    pub fn recovered(&self) -> f64 {
        self.total_cases - self.total_deaths - self.new_cases
    }

    /// Date formatted as `YYYY-MM-DD`, empty when unknown
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// The full dataset, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
    locations: Vec<String>,
}

impl ObservationTable {
    /// Build a table, recording distinct locations in order of first appearance
    pub fn new(rows: Vec<Observation>) -> Self {
        let mut seen = HashSet::new();
        let mut locations = Vec::new();
        for row in &rows {
            if seen.insert(row.location.as_str()) {
                locations.push(row.location.clone());
            }
        }

        Self { rows, locations }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct location names, order of first appearance
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    /// Rows of a single location, in file order
    pub fn rows_for<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.rows.iter().filter(move |r| r.location == location)
    }

    /// Most recent known date across all locations
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().filter_map(|r| r.date).max()
    }

    /// Distinct known dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .filter_map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> TableStats {
        let known: Vec<NaiveDate> = self.rows.iter().filter_map(|r| r.date).collect();
        TableStats {
            rows: self.rows.len(),
            locations: self.locations.len(),
            first_date: known.iter().min().copied(),
            last_date: known.iter().max().copied(),
            unknown_dates: self.rows.len() - known.len(),
        }
    }
}

/// Summary of a loaded table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStats {
    pub rows: usize,
    pub locations: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub unknown_dates: usize,
}

impl std::fmt::Display for TableStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => "no dated rows".to_string(),
        };
        write!(
            f,
            "{} rows, {} locations, {} ({} unknown dates)",
            self.rows, self.locations, span, self.unknown_dates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(location: &str, date: Option<&str>, total_cases: f64) -> Observation {
        Observation {
            location: location.to_string(),
            iso_code: String::new(),
            date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            total_cases,
            new_cases: 0.0,
            total_deaths: 0.0,
        }
    }

    #[test]
    fn test_locations_keep_first_appearance_order() {
        let table = ObservationTable::new(vec![
            obs("Chile", Some("2021-01-01"), 1.0),
            obs("Austria", Some("2021-01-01"), 1.0),
            obs("Chile", Some("2021-01-02"), 2.0),
        ]);

        assert_eq!(table.locations(), &["Chile".to_string(), "Austria".to_string()]);
        assert!(table.contains_location("Austria"));
        assert!(!table.contains_location("Peru"));
        assert_eq!(table.rows_for("Chile").count(), 2);
    }

    #[test]
    fn test_dates_skip_unknown() {
        let table = ObservationTable::new(vec![
            obs("Chile", Some("2021-01-02"), 1.0),
            obs("Chile", None, 1.0),
            obs("Peru", Some("2021-01-01"), 1.0),
            obs("Peru", Some("2021-01-02"), 1.0),
        ]);

        assert_eq!(table.dates().len(), 2);
        assert_eq!(table.latest_date(), NaiveDate::from_ymd_opt(2021, 1, 2));

        let stats = table.stats();
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.locations, 2);
        assert_eq!(stats.unknown_dates, 1);
        assert_eq!(
            stats.to_string(),
            "4 rows, 2 locations, 2021-01-01 to 2021-01-02 (1 unknown dates)"
        );
    }

    #[test]
    fn test_recovered_approximation() {
        let row = Observation {
            location: "Chile".to_string(),
            iso_code: "CHL".to_string(),
            date: None,
            total_cases: 1000.0,
            new_cases: 50.0,
            total_deaths: 20.0,
        };
        assert_eq!(row.recovered(), 930.0);
        assert_eq!(row.date_label(), "");
    }
}
