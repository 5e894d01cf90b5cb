//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page (sidebar, title, three charts)
//!
//! ## Selection
//! - `GET /api/v1/countries` - Dropdown options and current selection
//! - `GET /api/v1/selection` - Current selection
//! - `PUT /api/v1/selection` - Change the selection
//!
//! ## Charts
//! - `GET /api/v1/dashboard` - All three panels
//! - `GET /api/v1/charts/time-series` - Ladder score over time
//! - `GET /api/v1/charts/indicators` - Explained-by breakdown
//! - `GET /api/v1/charts/world-map` - World choropleth
//!
//! ## Dataset
//! - `GET /api/v1/dataset` - Loaded spreadsheet summary
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use happiness_dashboard::api::{serve, ApiConfig, AppState};
//! use happiness_dashboard::dashboard::RenderOptions;
//! use happiness_dashboard::data::{DatasetCache, SpreadsheetLoader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(DatasetCache::new(SpreadsheetLoader::new("happiness_data.xlsx")));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, RenderOptions::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Selection routes
        .route("/countries", get(routes::countries::list_countries))
        .route(
            "/selection",
            get(routes::countries::get_selection).put(routes::countries::set_selection),
        )
        // Chart routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/charts/time-series", get(routes::charts::get_time_series))
        .route("/charts/indicators", get(routes::charts::get_indicators))
        .route("/charts/world-map", get(routes::charts::get_world_map))
        // Dataset routes
        .route("/dataset", get(routes::dataset::get_dataset));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Happiness dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Happiness dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{CountryListResponse, DatasetSummaryResponse, SelectionResponse};
    use crate::dashboard::{LatestYearPolicy, RenderOptions};
    use crate::data::{DatasetCache, SpreadsheetLoader};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    const CSV: &str = "\
Country Name,Year,Ladder Score,Explained by: Log GDP per capita,Explained by: Social support,Explained by: Healthy life expectancy,Explained by: Freedom to make life choices,Explained by: Generosity,Explained by: Perceptions of corruption
Finland,2023,7.8,1.9,1.6,0.8,0.7,0.1,0.5
Finland,2022,7.7,1.8,1.5,0.8,0.7,0.1,0.5
Denmark,2023,7.5,1.9,1.5,0.8,0.7,0.2,0.5
Chad,2022,4.4,0.6,0.4,0.1,0.2,0.1,0.1
";

    fn app_at(path: &Path, options: RenderOptions) -> Router {
        let dataset = Arc::new(DatasetCache::new(SpreadsheetLoader::new(path)));
        build_router(AppState::new(dataset, options, ApiConfig::default()))
    }

    fn create_test_app_with(options: RenderOptions) -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("happiness_data.csv");
        std::fs::write(&path, CSV).unwrap();
        (app_at(&path, options), dir)
    }

    fn create_test_app() -> (Router, TempDir) {
        create_test_app_with(RenderOptions::default())
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn put_json(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let response = get(&app, "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();
        let response = get(&app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_dataset() {
        let dir = tempdir().unwrap();
        let app = app_at(&dir.path().join("missing.csv"), RenderOptions::default());

        let response = get(&app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(&app, "/health").await;
        let body: serde_json::Value = json(response).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["dataset"], "error");
    }

    #[tokio::test]
    async fn test_page() {
        let (app, _dir) = create_test_app();
        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_countries() {
        let (app, _dir) = create_test_app();

        let response = get(&app, "/api/v1/countries").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: CountryListResponse = json(response).await;
        assert_eq!(body.countries, vec!["Chad", "Denmark", "Finland"]);
        assert_eq!(body.selected, "Chad");
        assert_eq!(body.total, 3);
    }

    #[tokio::test]
    async fn test_selection_persists() {
        let (app, _dir) = create_test_app();

        let response = put_json(&app, "/api/v1/selection", r#"{"country": "Finland"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: SelectionResponse = json(get(&app, "/api/v1/selection").await).await;
        assert_eq!(body.country, "Finland");

        let body: serde_json::Value = json(get(&app, "/api/v1/dashboard").await).await;
        assert_eq!(body["sidebar"]["selected"], "Finland");
        assert_eq!(body["time_series"]["figure"]["data"][0]["x"], serde_json::json!([2022, 2023]));
        assert_eq!(
            body["time_series"]["figure"]["data"][0]["y"],
            serde_json::json!([7.7, 7.8])
        );
    }

    #[tokio::test]
    async fn test_select_unknown_country() {
        let (app, _dir) = create_test_app();

        let response = put_json(&app, "/api/v1/selection", r#"{"country": "Atlantis"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = put_json(&app, "/api/v1/selection", r#"{"country": "  "}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_for_country() {
        let (app, _dir) = create_test_app();

        let response = get(&app, "/api/v1/dashboard?country=Denmark").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["latest_year"], 2023);
        assert_eq!(body["indicators"]["subheader"], "Denmark - Indicator Breakdown (2023)");
        assert_eq!(
            body["indicators"]["figure"]["data"][0]["r"]
                .as_array()
                .map(|r| r.len()),
            Some(6)
        );
        assert_eq!(
            body["world_map"]["figure"]["data"][0]["locations"],
            serde_json::json!(["Finland", "Denmark"])
        );

        // Query parameter does not change the persisted selection
        let body: SelectionResponse = json(get(&app, "/api/v1/selection").await).await;
        assert_eq!(body.country, "Chad");
    }

    #[tokio::test]
    async fn test_dashboard_missing_latest_year_row() {
        let (app, _dir) = create_test_app();

        let response = get(&app, "/api/v1/dashboard?country=Chad").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["error"]["code"], "NO_RECORD_FOR_YEAR");
    }

    #[tokio::test]
    async fn test_dashboard_country_latest_policy() {
        let (app, _dir) = create_test_app_with(RenderOptions {
            latest_year_policy: LatestYearPolicy::CountryLatest,
            ..Default::default()
        });

        let response = get(&app, "/api/v1/charts/indicators?country=Chad").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["subheader"], "Chad - Indicator Breakdown (2022)");
    }

    #[tokio::test]
    async fn test_chart_endpoints() {
        let (app, _dir) = create_test_app();

        let response = get(&app, "/api/v1/charts/time-series?country=Finland").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&app, "/api/v1/charts/world-map").await;
        let body: serde_json::Value = json(response).await;
        assert_eq!(body["figure"]["data"][0]["type"], "choropleth");
        assert_eq!(body["subheader"], "World Happiness Map (2023)");

        let response = get(&app, "/api/v1/charts/time-series?country=Atlantis").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dataset_summary() {
        let (app, _dir) = create_test_app();

        let body: DatasetSummaryResponse = json(get(&app, "/api/v1/dataset").await).await;
        assert_eq!(body.rows, 4);
        assert_eq!(body.countries, 3);
        assert_eq!((body.first_year, body.latest_year), (2022, 2023));
        assert!(body.columns.contains(&"explained_by_generosity".to_string()));
    }

    #[tokio::test]
    async fn test_missing_dataset_is_server_error() {
        let dir = tempdir().unwrap();
        let app = app_at(&dir.path().join("missing.xlsx"), RenderOptions::default());

        let response = get(&app, "/api/v1/dashboard").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["error"]["code"], "DATA_ERROR");
    }
}
