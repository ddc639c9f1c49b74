//! Dataset Loader
//!
//! Reads the observation CSV into memory and memoizes the result for the
//! lifetime of the process.
//!
//! ```text
//! DatasetCache::get()
//!   first call:  open → check header → deserialize rows → preprocess → Arc
//!   later calls: the same Arc, no I/O
//! ```
//!
//! A failed load is not memoized; the next call reads the file again.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;

use super::error::{DataError, DataResult};
use super::preprocess::preprocess;
use super::types::{Observation, ObservationTable, RawObservation, REQUIRED_COLUMNS};

/// Load and preprocess the dataset at `path`
pub fn load_observations(path: &Path) -> DataResult<ObservationTable> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_observations(file)
}

/// Load and preprocess a dataset from any reader
pub fn read_observations<R: Read>(reader: R) -> DataResult<ObservationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    check_columns(&headers)?;

    let mut raw = Vec::new();
    for record in reader.deserialize::<RawObservation>() {
        raw.push(record?);
    }

    Ok(preprocess(raw))
}

/// Load from a CSV string (useful for testing)
pub fn read_observations_str(csv_data: &str) -> DataResult<ObservationTable> {
    read_observations(csv_data.as_bytes())
}

fn check_columns(headers: &csv::StringRecord) -> DataResult<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Write observations back out in the dataset's CSV layout
///
/// Unknown dates become empty cells, so reading the output again yields the
/// same observations.
pub fn write_observations<W: Write>(rows: &[Observation], writer: W) -> DataResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Process-wide, init-once/read-many holder of the observation table
pub struct DatasetCache {
    path: PathBuf,
    table: OnceCell<Arc<ObservationTable>>,
}

impl DatasetCache {
    /// Create an empty cache; nothing is read until the first `get()`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// Create a cache that already holds a table
    pub fn preloaded(table: ObservationTable) -> Self {
        Self {
            path: PathBuf::new(),
            table: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the table has been loaded
    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }

    /// Get the table, loading it on first access
    pub async fn get(&self) -> DataResult<Arc<ObservationTable>> {
        let table = self
            .table
            .get_or_try_init(|| async {
                let path = self.path.clone();
                tracing::info!(path = %path.display(), "Loading dataset");
                let started = Instant::now();

                let table = tokio::task::spawn_blocking(move || load_observations(&path))
                    .await
                    .map_err(|e| DataError::Load(e.to_string()))??;

                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Dataset loaded: {}",
                    table.stats()
                );
                Ok::<_, DataError>(Arc::new(table))
            })
            .await?;

        Ok(Arc::clone(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::SAMPLE_CSV;

    #[test]
    fn test_read_sample() {
        let table = read_observations_str(SAMPLE_CSV).unwrap();

        assert_eq!(table.len(), 12);
        assert_eq!(
            table.locations(),
            &["Chile", "Nauru", "Kosovo", "World"].map(String::from)
        );
    }

    #[test]
    fn test_missing_column_fails() {
        let csv_data = "location,date,total_cases,new_cases,total_deaths\nChile,2021-03-01,1,1,0";
        let err = read_observations_str(csv_data).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "iso_code"));
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let csv_data = "iso_code,location,date,total_cases,new_cases,total_deaths
CHL,Chile,2021-03-01,lots,1,0";
        let err = read_observations_str(csv_data).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_padded_cells_are_trimmed() {
        let csv_data = "iso_code, location, date, total_cases, new_cases, total_deaths
CHL, Chile, 2021-03-01, 1000, 100, 20";
        let table = read_observations_str(csv_data).unwrap();
        let row = &table.rows()[0];

        assert_eq!(row.location, "Chile");
        assert_eq!(row.iso_code, "CHL");
        assert_eq!(row.date, chrono::NaiveDate::from_ymd_opt(2021, 3, 1));
        assert_eq!(row.total_cases, 1000.0);
        assert_eq!(row.total_deaths, 20.0);
    }

    #[test]
    fn test_ragged_row_fails() {
        let csv_data = "iso_code,location,date,total_cases,new_cases,total_deaths
CHL,Chile,2021-03-01,1,1";
        assert!(read_observations_str(csv_data).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_observations(Path::new("/nonexistent/owid.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_preprocessing_is_idempotent() {
        let once = read_observations_str(SAMPLE_CSV).unwrap();

        let mut buffer = Vec::new();
        write_observations(once.rows(), &mut buffer).unwrap();
        let twice = read_observations(buffer.as_slice()).unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_cache_loads_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let cache = DatasetCache::new(file.path());
        assert!(!cache.is_loaded());

        let first = cache.get().await.unwrap();
        assert!(cache.is_loaded());

        // Later reads never touch the file again
        std::fs::remove_file(file.path()).unwrap();
        let second = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_cache_does_not_memoize_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owid.csv");
        let cache = DatasetCache::new(&path);

        assert!(cache.get().await.is_err());
        assert!(!cache.is_loaded());

        std::fs::write(&path, SAMPLE_CSV).unwrap();
        assert_eq!(cache.get().await.unwrap().len(), 12);
    }
}
