//! Dashboard Route
//!
//! - GET /api/v1/dashboard - All three panels for one render pass
//!
//! `?country=` renders a specific country without changing the persisted
//! selection.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::CountryQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render, DashboardView};

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountryQuery>,
) -> ApiResult<Json<DashboardView>> {
    let (table, selector) = state.selector(query.country.as_deref()).await?;
    let view = render(&table, &selector, &state.render_options)?;

    tracing::debug!(country = selector.selected(), "Rendered dashboard");
    Ok(Json(view))
}
