//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::HappinessTable;

// ============================================
// SELECTION DTOs
// ============================================

/// Optional `?country=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct CountryQuery {
    #[serde(default)]
    pub country: Option<String>,
}

/// Change the persisted sidebar selection
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub country: String,
}

/// Current sidebar selection
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub country: String,
}

/// Country dropdown options
#[derive(Debug, Serialize, Deserialize)]
pub struct CountryListResponse {
    /// Sorted, de-duplicated names
    pub countries: Vec<String>,
    /// Currently selected name
    pub selected: String,
    pub total: usize,
}

// ============================================
// DATASET DTOs
// ============================================

/// Summary of the loaded spreadsheet
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetSummaryResponse {
    pub path: String,
    pub rows: usize,
    pub countries: usize,
    pub first_year: i32,
    pub latest_year: i32,
    /// Normalized column names in sheet order
    pub columns: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl From<&HappinessTable> for DatasetSummaryResponse {
    fn from(table: &HappinessTable) -> Self {
        let (first_year, latest_year) = table.year_span();
        Self {
            path: table.source().display().to_string(),
            rows: table.len(),
            countries: table.countries().len(),
            first_year,
            latest_year,
            columns: table.columns().to_vec(),
            loaded_at: table.loaded_at(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Dataset status: loaded, error
    pub dataset: String,
    /// Rows in the loaded dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Load error, when the dataset is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
