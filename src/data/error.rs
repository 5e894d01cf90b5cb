//! Dataset error types
//!
//! Defines all errors that can occur while reading and shaping the spreadsheet.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the happiness dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or a worksheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// CSV input could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File extension is not a spreadsheet format we can read
    #[error("Unsupported spreadsheet format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// A required column is absent after header normalization
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A cell could not be converted to the type its column requires
    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Background load task panicked or was cancelled
    #[error("Load task failed: {0}")]
    LoadTask(String),

    /// The sheet has a header but no data rows
    #[error("Dataset is empty: {0:?}")]
    EmptyDataset(PathBuf),
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Spreadsheet(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DataResult<T> = Result<T, DataError>;
