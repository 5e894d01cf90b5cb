//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig as ServerConfig;
use crate::dashboard::{LatestYearPolicy, RenderOptions, DEFAULT_COLOR_SCALE, DEFAULT_TITLE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input spreadsheet configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: String,

    /// Worksheet to read; the first sheet when unset
    #[serde(default)]
    pub sheet: Option<String>,
}

fn default_data_path() -> String {
    "happiness_data.xlsx".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            sheet: None,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Chart and page presentation
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub latest_year_policy: LatestYearPolicy,

    #[serde(default = "default_color_scale")]
    pub color_scale: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_color_scale() -> String {
    DEFAULT_COLOR_SCALE.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            latest_year_policy: LatestYearPolicy::default(),
            color_scale: default_color_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("happiness").join("config.toml")),
            Some(PathBuf::from("/etc/happiness/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Data overrides
        if let Some(path) = var("HAPPINESS_DATA_PATH") {
            self.data.path = path;
        }
        if let Some(sheet) = var("HAPPINESS_DATA_SHEET") {
            self.data.sheet = Some(sheet);
        }

        // API overrides
        if let Some(host) = var("HAPPINESS_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("HAPPINESS_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid HAPPINESS_API_PORT: {}", port),
            }
        }

        // Dashboard overrides
        if let Some(policy) = var("HAPPINESS_LATEST_YEAR_POLICY") {
            match policy.parse() {
                Ok(p) => self.dashboard.latest_year_policy = p,
                Err(e) => tracing::warn!("Ignoring HAPPINESS_LATEST_YEAR_POLICY: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = var("HAPPINESS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("HAPPINESS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Server settings for the API layer
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.api.host.clone(),
            port: self.api.port,
            cors_origins: self.api.cors_origins.clone(),
            request_timeout_ms: self.api.request_timeout_secs.saturating_mul(1000),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.dashboard.title.clone(),
            color_scale: self.dashboard.color_scale.clone(),
            latest_year_policy: self.dashboard.latest_year_policy,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Happiness Dashboard Configuration
#
# Environment variables override these settings:
# - HAPPINESS_DATA_PATH
# - HAPPINESS_DATA_SHEET
# - HAPPINESS_API_HOST
# - HAPPINESS_API_PORT
# - HAPPINESS_LATEST_YEAR_POLICY
# - HAPPINESS_LOG_LEVEL
# - HAPPINESS_LOG_FORMAT

[data]
# Spreadsheet with the survey results (.xlsx, .xls, .ods or .csv)
path = "happiness_data.xlsx"

# Worksheet name (default: first sheet)
# sheet = "Sheet1"

[api]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8501

# Allowed CORS origins (empty = allow any)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Page title
title = "😊 Global Happiness Index Dashboard"

# Year used by the indicator breakdown:
# "global" (dataset-wide latest year) or "country_latest"
latest_year_policy = "global"

# Plotly color scale for the world map
color_scale = "Viridis"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/happiness/dashboard.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_template_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.data.path, "happiness_data.xlsx");
        assert_eq!(config.api.port, 8501);
        assert_eq!(config.dashboard.latest_year_policy, LatestYearPolicy::Global);
        assert_eq!(config.dashboard.color_scale, "Viridis");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
[data]
path = "data/whr.csv"

[dashboard]
latest_year_policy = "country_latest"
"#,
        )
        .unwrap();

        assert_eq!(config.data.path, "data/whr.csv");
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(
            config.render_options().latest_year_policy,
            LatestYearPolicy::CountryLatest
        );
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HAPPINESS_DATA_PATH", "/srv/happiness.xlsx"),
            ("HAPPINESS_API_PORT", "9000"),
            ("HAPPINESS_LATEST_YEAR_POLICY", "country_latest"),
            ("HAPPINESS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.path, "/srv/happiness.xlsx");
        assert_eq!(config.server_config().addr(), "0.0.0.0:9000");
        assert_eq!(
            config.dashboard.latest_year_policy,
            LatestYearPolicy::CountryLatest
        );
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_env_port_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "HAPPINESS_API_PORT").then(|| "abc".to_string()));
        assert_eq!(config.api.port, 8501);
    }

    #[test]
    fn test_large_request_timeout_saturates() {
        let mut config = Config::default();
        config.api.request_timeout_secs = u64::MAX;
        assert_eq!(config.server_config().request_timeout_ms, u64::MAX);

        config.api.request_timeout_secs = 45;
        assert_eq!(config.server_config().request_timeout_ms, 45_000);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/happiness.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
