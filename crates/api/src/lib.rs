//! Weather Forecast API Server
//!
//! REST API over the two in-memory forecast stores.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use forecast_service::ForecastService;
use serde::Serialize;
use std::sync::Arc;
use storage::DataContext;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};

use routes::forecasts::ForecastRoutes;

/// Application state shared across handlers
pub struct AppState {
    /// Both forecast stores
    pub context: DataContext,
    /// Service over `WeatherForecasts`
    pub weather: ForecastService,
    /// Service over `SecondSourceForecasts`
    pub second_source: ForecastService,
    /// Loaded configuration
    pub config: ServerConfig,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state with empty stores
    pub fn new(config: ServerConfig) -> Self {
        let context = DataContext::new(config.unique_dates);
        let service = |store| {
            ForecastService::new(store).with_max_generate_count(config.max_generate_count)
        };

        Self {
            weather: service(context.weather_forecasts.clone()),
            second_source: service(context.second_source_forecasts.clone()),
            context,
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub stores: StoreCounts,
}

/// Record counts per store
#[derive(Debug, Serialize)]
pub struct StoreCounts {
    pub weather_forecasts: usize,
    pub second_source_forecasts: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mount = |service: &ForecastService| {
        routes::forecasts::router(ForecastRoutes {
            service: service.clone(),
            default_count: state.config.default_generate_count,
        })
    };

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .with_state(state.clone())
        .nest("/weatherforecast", mount(&state.weather))
        .nest("/second", mount(&state.second_source))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        stores: StoreCounts {
            weather_forecasts: state.context.weather_forecasts.len(),
            second_source_forecasts: state.context.second_source_forecasts.len(),
        },
    })
}

/// Initialize logging
pub fn init_logging(level: Level) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Run the server until it fails
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Starting API server on {}", listener.local_addr()?);

    serve(listener, Arc::new(AppState::new(config))).await
}

/// Serve the router on an already bound listener
pub async fn serve(listener: tokio::net::TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::default());
        (state.clone(), create_router(state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_, app) = app();
        let (status, body) = send(&app, "GET", "/api/v1/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stores"]["weather_forecasts"], 0);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (state, app) = app();
        let (status, created) = send(
            &app,
            "POST",
            "/weatherforecast",
            Some(json!({"date": "2024-01-01", "temperatureC": 100, "summary": "Scorching"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["temperatureF"], 211);

        let (status, listed) = send(&app, "GET", "/weatherforecast", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));

        assert!(state.context.second_source_forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_returns_error_map() {
        let (state, app) = app();
        let (status, body) = send(
            &app,
            "POST",
            "/weatherforecast",
            Some(json!({"date": "2024-01-01", "temperatureC": "hot", "summary": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["errors"]["temperatureC"], "Temperature must be a number");
        assert_eq!(body["errors"]["summary"], "Summary is required");
        assert!(body["errors"].get("date").is_none());
        assert!(state.context.weather_forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_extreme_temperature_stays_listable() {
        let (state, app) = app();
        let body = json!({"date": "2024-01-01", "temperatureC": 2_000_000_000, "summary": "Scorching"});
        let (status, created) = send(&app, "POST", "/weatherforecast", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["temperatureC"], 2_000_000_000);
        assert_eq!(created["temperatureF"], i32::MAX);

        let body = json!({"date": "2024-01-02", "temperatureC": i32::MIN, "summary": "Freezing"});
        let (status, _) = send(&app, "POST", "/weatherforecast", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, listed) = send(&app, "GET", "/weatherforecast", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[1]["temperatureF"], i32::MIN);
        assert_eq!(state.context.weather_forecasts.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_json_error() {
        let (state, app) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/weatherforecast")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "bad_request");

        let body = json!({"date": "2024-01-01", "temperatureC": 5, "summary": 5});
        let (status, body) = send(&app, "PUT", "/weatherforecast", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, body) = send(&app, "PATCH", "/second?count=lots", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        assert!(state.context.weather_forecasts.is_empty());
        assert!(state.context.second_source_forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let (state, app) = app();
        let body = json!({"date": "2024-01-01", "temperatureC": 15, "summary": "Cool"});
        let (status, _) = send(&app, "PUT", "/second", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let body = json!({"date": "2024-01-01", "temperatureC": "20", "summary": "Warm"});
        let (status, updated) = send(&app, "PUT", "/second", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["summary"], "Warm");
        assert_eq!(updated["temperatureC"], 20);

        assert_eq!(state.context.second_source_forecasts.len(), 1);
        assert!(state.context.weather_forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (state, app) = app();
        let body = json!({"date": "2024-01-01", "temperatureC": 15, "summary": "Cool"});
        send(&app, "POST", "/weatherforecast", Some(body)).await;

        let (status, body) = send(&app, "DELETE", "/weatherforecast?date=2024-02-01", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(state.context.weather_forecasts.len(), 1);

        let (status, body) = send(&app, "DELETE", "/weatherforecast?date=tomorrow", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["date"].is_string());

        let (status, body) = send(&app, "DELETE", "/weatherforecast?date=2024-01-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        assert!(state.context.weather_forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_patch_generates() {
        let (state, app) = app();

        let (status, batch) = send(&app, "PATCH", "/weatherforecast", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(batch.as_array().unwrap().len(), 5);

        let (status, batch) = send(&app, "PATCH", "/weatherforecast?count=7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(batch.as_array().unwrap().len(), 7);

        assert_eq!(state.context.weather_forecasts.len(), 12);

        let (status, _) = send(&app, "PATCH", "/weatherforecast?count=5000", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.context.weather_forecasts.len(), 12);
    }
}
