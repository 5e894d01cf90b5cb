//! Dashboard error types

use thiserror::Error;

use crate::data::DataError;

/// Errors that can occur while rendering the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Selected country is not one of the selector options
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// The country has no row for the year the breakdown needs
    #[error("No record for {country} in {year}")]
    NoRecordForYear { country: String, year: i32 },

    /// The dataset could not be loaded
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
