//! Chart Routes
//!
//! Single panels, so a client can refresh one chart at a time.
//!
//! - GET /api/v1/charts/time-series - Ladder score over time
//! - GET /api/v1/charts/indicators - Explained-by radar for the latest year
//! - GET /api/v1/charts/world-map - Choropleth for the latest year

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::CountryQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{indicator_breakdown, time_series, world_map, Panel};

/// GET /api/v1/charts/time-series
pub async fn get_time_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountryQuery>,
) -> ApiResult<Json<Panel>> {
    let (table, selector) = state.selector(query.country.as_deref()).await?;
    Ok(Json(time_series(&table, selector.selected())))
}

/// GET /api/v1/charts/indicators
pub async fn get_indicators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountryQuery>,
) -> ApiResult<Json<Panel>> {
    let (table, selector) = state.selector(query.country.as_deref()).await?;
    let panel = indicator_breakdown(
        &table,
        selector.selected(),
        state.render_options.latest_year_policy,
    )?;
    Ok(Json(panel))
}

/// GET /api/v1/charts/world-map
pub async fn get_world_map(State(state): State<Arc<AppState>>) -> ApiResult<Json<Panel>> {
    let table = state.table().await?;
    Ok(Json(world_map(&table, &state.render_options.color_scale)))
}
