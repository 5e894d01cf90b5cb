//! Dashboard Renderer
//!
//! Turns the loaded table and a country selection into three chart panels:
//!
//! - **Time series**: ladder score by year for the selected country
//! - **Indicator breakdown**: radar of the six explained-by fields
//! - **World map**: choropleth of ladder scores for the latest year
//!
//! # Example
//!
//! ```rust,ignore
//! use happiness_dashboard::dashboard::{render, CountrySelector, RenderOptions};
//!
//! let table = cache.get()?;
//! let mut selector = CountrySelector::from_table(&table);
//! selector.select("Finland")?;
//! let view = render(&table, &selector, &RenderOptions::default())?;
//! println!("{}", serde_json::to_string_pretty(&view)?);
//! ```

mod error;
pub mod figure;
mod render;
mod selector;
mod views;

pub use error::{DashboardError, DashboardResult};
pub use figure::{Figure, Layout, Trace};
pub use render::{
    render, render_country, DashboardView, LatestYearPolicy, RenderOptions, Sidebar,
    DEFAULT_COLOR_SCALE, DEFAULT_TITLE,
};
pub use selector::{CountrySelector, SELECT_LABEL, SIDEBAR_TITLE};
pub use views::{indicator_breakdown, time_series, world_map, Panel};
