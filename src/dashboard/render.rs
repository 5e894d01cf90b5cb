//! Dashboard render pass
//!
//! [`render`] is invoked once per selection change. It takes the already
//! loaded table, so the expensive read and normalize step never runs here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DashboardResult;
use super::selector::{CountrySelector, SELECT_LABEL, SIDEBAR_TITLE};
use super::views::{indicator_breakdown, time_series, world_map, Panel};
use crate::data::HappinessTable;

pub const DEFAULT_TITLE: &str = "😊 Global Happiness Index Dashboard";
pub const DEFAULT_COLOR_SCALE: &str = "Viridis";

/// Which year the indicator breakdown uses for a country
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatestYearPolicy {
    /// Always the dataset-wide latest year; missing rows are an error
    #[default]
    Global,
    /// Fall back to the country's own most recent year
    CountryLatest,
}

impl FromStr for LatestYearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(LatestYearPolicy::Global),
            "country_latest" | "country-latest" => Ok(LatestYearPolicy::CountryLatest),
            other => Err(format!("Unknown latest-year policy: {}", other)),
        }
    }
}

/// Presentation options for a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub color_scale: String,
    pub latest_year_policy: LatestYearPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            color_scale: DEFAULT_COLOR_SCALE.to_string(),
            latest_year_policy: LatestYearPolicy::default(),
        }
    }
}

/// Sidebar state as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub title: String,
    pub label: String,
    pub options: Vec<String>,
    pub selected: String,
}

impl From<&CountrySelector> for Sidebar {
    fn from(selector: &CountrySelector) -> Self {
        Self {
            title: SIDEBAR_TITLE.to_string(),
            label: SELECT_LABEL.to_string(),
            options: selector.options().to_vec(),
            selected: selector.selected().to_string(),
        }
    }
}

/// Everything the page shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub sidebar: Sidebar,
    pub latest_year: i32,
    pub time_series: Panel,
    pub indicators: Panel,
    pub world_map: Panel,
}

/// Build all three views for the selector's current country
pub fn render(
    table: &HappinessTable,
    selector: &CountrySelector,
    options: &RenderOptions,
) -> DashboardResult<DashboardView> {
    let country = selector.selected();
    tracing::debug!(country, latest_year = table.latest_year(), "Rendering dashboard");

    let time_series = time_series(table, country);
    let indicators = indicator_breakdown(table, country, options.latest_year_policy)?;
    let world_map = world_map(table, &options.color_scale);

    Ok(DashboardView {
        title: options.title.clone(),
        sidebar: Sidebar::from(selector),
        latest_year: table.latest_year(),
        time_series,
        indicators,
        world_map,
    })
}

/// Convenience wrapper: select `country` then render
pub fn render_country(
    table: &HappinessTable,
    country: &str,
    options: &RenderOptions,
) -> DashboardResult<DashboardView> {
    let mut selector = CountrySelector::from_table(table);
    selector.select(country)?;
    render(table, &selector, options)
}
