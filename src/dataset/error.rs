//! Dataset error types
//!
//! Every variant is a Data-Unavailable condition: the render that hit it
//! cannot continue and the error is surfaced to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or slicing the dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// The dataset file could not be opened
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed (ragged row, non-numeric value, bad UTF-8)
    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks one of the required columns
    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    /// A location that must be present has no rows
    #[error("No data for location: {location}")]
    NoRows { location: String },

    /// The background load task died
    #[error("Dataset load failed: {0}")]
    Load(String),
}

impl DataError {
    pub fn no_rows(location: impl Into<String>) -> Self {
        DataError::NoRows {
            location: location.into(),
        }
    }
}

/// Result type alias for dataset operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::no_rows("World");
        assert_eq!(err.to_string(), "No data for location: World");

        let err = DataError::MissingColumn("iso_code".to_string());
        assert_eq!(
            err.to_string(),
            "Dataset is missing required column: iso_code"
        );
    }
}
