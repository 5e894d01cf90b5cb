//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::dashboard::{CountrySelector, RenderOptions};
use crate::data::{DatasetCache, HappinessTable};

use super::error::ApiResult;

/// Shared application state for all handlers
pub struct AppState {
    /// Memoized spreadsheet; read from disk on first access only
    pub dataset: Arc<DatasetCache>,
    /// Country chosen in the sidebar, kept until changed
    pub selection: RwLock<Option<String>>,
    /// Title, color scale and latest-year policy for render passes
    pub render_options: Arc<RenderOptions>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<DatasetCache>, render_options: RenderOptions, config: ApiConfig) -> Self {
        Self {
            dataset,
            selection: RwLock::new(None),
            render_options: Arc::new(render_options),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Loaded table, reading the file on first call
    pub async fn table(&self) -> ApiResult<Arc<HappinessTable>> {
        Ok(self.dataset.load().await?)
    }

    /// Selector for a render pass.
    ///
    /// An explicit `requested` country wins for this pass only; otherwise the
    /// persisted selection (or the first option) is used.
    pub async fn selector(
        &self,
        requested: Option<&str>,
    ) -> ApiResult<(Arc<HappinessTable>, CountrySelector)> {
        let table = self.table().await?;

        let selector = match requested {
            Some(country) => CountrySelector::restore(&table, Some(country))?,
            None => {
                let persisted = self.selection.read().await;
                CountrySelector::restore(&table, persisted.as_deref())?
            }
        };

        Ok((table, selector))
    }

    /// Persist a new selection after checking it against the options
    pub async fn select(&self, country: &str) -> ApiResult<CountrySelector> {
        let table = self.table().await?;
        let selector = CountrySelector::restore(&table, Some(country))?;

        *self.selection.write().await = Some(selector.selected().to_string());
        tracing::info!(country = selector.selected(), "Country selection changed");

        Ok(selector)
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; any origin when empty
    pub cors_origins: Vec<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            cors_origins: Vec::new(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
