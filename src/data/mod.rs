//! Happiness Dataset
//!
//! Loading and shaping of the survey spreadsheet:
//!
//! - **Columns**: header normalization and the six explained-by indicators
//! - **Loader**: reads `.xlsx`/`.xls`/`.ods` workbooks and `.csv` files
//! - **Table**: typed records and the derived per-country / per-year views
//! - **Cache**: write-once, process-wide holder for the loaded table
//!
//! # Example
//!
//! ```rust,no_run
//! use happiness_dashboard::data::{DatasetCache, SpreadsheetLoader};
//!
//! let cache = DatasetCache::new(SpreadsheetLoader::new("happiness_data.xlsx"));
//! let table = cache.get()?;
//! println!("{} rows, latest year {}", table.len(), table.latest_year());
//! # Ok::<(), happiness_dashboard::data::DataError>(())
//! ```

mod cache;
pub mod columns;
mod error;
pub mod loader;
mod table;

pub use cache::DatasetCache;
pub use columns::{indicator_label, normalize_column_name, normalize_headers, Indicator};
pub use error::{DataError, DataResult};
pub use loader::SpreadsheetLoader;
pub use table::{HappinessRecord, HappinessTable};
