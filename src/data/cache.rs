//! Dataset cache
//!
//! Write-once holder for the loaded table. The first successful load is kept
//! for the life of the process; later calls return the same `Arc` without
//! touching the disk. A failed load leaves the cache empty.

use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

use super::error::{DataError, DataResult};
use super::loader::SpreadsheetLoader;
use super::table::HappinessTable;

/// Memoized dataset loader
#[derive(Debug)]
pub struct DatasetCache {
    loader: SpreadsheetLoader,
    table: OnceCell<Arc<HappinessTable>>,
}

impl DatasetCache {
    pub fn new(loader: SpreadsheetLoader) -> Self {
        Self {
            loader,
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.loader.path()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Return the cached table, reading the file on first use
    pub fn get(&self) -> DataResult<Arc<HappinessTable>> {
        self.table
            .get_or_try_init(|| {
                tracing::info!(path = %self.loader.path().display(), "Loading dataset into cache");
                self.loader.load().map(Arc::new)
            })
            .map(Arc::clone)
    }

    /// Async variant of [`get`](Self::get); the first read runs on the blocking pool
    pub async fn load(self: &Arc<Self>) -> DataResult<Arc<HappinessTable>> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let cache = Arc::clone(self);
        tokio::task::spawn_blocking(move || cache.get())
            .await
            .map_err(|e| DataError::LoadTask(e.to_string()))?
    }
}
