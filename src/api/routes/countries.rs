//! Country Selector Routes
//!
//! - GET /api/v1/countries - Dropdown options and current selection
//! - GET /api/v1/selection - Current selection
//! - PUT /api/v1/selection - Change the persisted selection

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CountryListResponse, SelectionRequest, SelectionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/countries
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountryListResponse>> {
    let (_, selector) = state.selector(None).await?;

    Ok(Json(CountryListResponse {
        total: selector.options().len(),
        selected: selector.selected().to_string(),
        countries: selector.options().to_vec(),
    }))
}

/// GET /api/v1/selection
pub async fn get_selection(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SelectionResponse>> {
    let (_, selector) = state.selector(None).await?;

    Ok(Json(SelectionResponse {
        country: selector.selected().to_string(),
    }))
}

/// PUT /api/v1/selection
///
/// Only names from the dropdown options are accepted.
pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> ApiResult<Json<SelectionResponse>> {
    let country = req.country.trim();
    if country.is_empty() {
        return Err(ApiError::Validation("country must not be empty".to_string()));
    }

    let selector = state.select(country).await?;

    Ok(Json(SelectionResponse {
        country: selector.selected().to_string(),
    }))
}
