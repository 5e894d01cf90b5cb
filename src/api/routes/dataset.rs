//! Dataset Route
//!
//! - GET /api/v1/dataset - Summary of the loaded spreadsheet

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetSummaryResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/dataset
pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DatasetSummaryResponse>> {
    let table = state.table().await?;
    Ok(Json(DatasetSummaryResponse::from(table.as_ref())))
}
