//! # Happiness Dashboard
//!
//! Global Happiness Index dashboard: loads a spreadsheet of national
//! happiness-survey results and serves three charts driven by a country
//! selector.
//!
//! ## Features
//!
//! - **Spreadsheet input**: `.xlsx`, `.xls`, `.ods` and `.csv`, read once and cached
//! - **Normalized columns**: `"Explained by: Generosity"` becomes `explained_by_generosity`
//! - **Time series**: ladder score by year for the selected country
//! - **Indicator breakdown**: radar of the six explained-by contributions
//! - **World map**: choropleth of ladder scores for the latest year
//!
//! ## Modules
//!
//! - [`data`]: Spreadsheet loading, column normalization and the cached table
//! - [`dashboard`]: Country selector, chart builders and the render pass
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use happiness_dashboard::dashboard::{render, CountrySelector, RenderOptions};
//! use happiness_dashboard::data::{DatasetCache, SpreadsheetLoader};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = DatasetCache::new(SpreadsheetLoader::new("happiness_data.xlsx"));
//!     let table = cache.get()?;
//!
//!     let mut selector = CountrySelector::from_table(&table);
//!     selector.select("Finland")?;
//!
//!     let view = render(&table, &selector, &RenderOptions::default())?;
//!     println!("{}", view.time_series.subheader);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod logging;

// Re-export top-level types for convenience
pub use data::{
    DataError, DataResult, DatasetCache, HappinessRecord, HappinessTable, Indicator,
    SpreadsheetLoader,
};

pub use dashboard::{
    render, CountrySelector, DashboardError, DashboardResult, DashboardView, LatestYearPolicy,
    Panel, RenderOptions,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    generate_default_config, Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig,
};
