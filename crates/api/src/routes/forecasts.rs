//! Forecast Routes
//!
//! One router per forecast store, all verbs on the collection root.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use data_validator::{Field, ForecastInput, ValidationError, ValidationErrors};
use forecast_service::ForecastService;
use serde::Deserialize;
use serde_json::Value;
use storage::ForecastRecord;

use crate::error::{ApiError, ApiResult};

/// State for one mounted forecast store
#[derive(Clone)]
pub struct ForecastRoutes {
    pub service: ForecastService,
    /// Batch size used when PATCH omits `count`
    pub default_count: u32,
}

/// Build the collection router for one store
pub fn router(routes: ForecastRoutes) -> Router {
    Router::new()
        .route(
            "/",
            get(list_forecasts)
                .post(create_forecast)
                .put(update_forecast)
                .delete(delete_forecast)
                .patch(generate_forecasts),
        )
        .with_state(routes)
}

/// Request body for POST and PUT.
///
/// Every field is optional so that missing values surface as
/// validation errors rather than decode failures.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastBody {
    #[serde(default)]
    pub date: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    pub temperature_c: Option<Value>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl From<ForecastBody> for ForecastInput {
    fn from(body: ForecastBody) -> Self {
        let temperature_c = match body.temperature_c {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        ForecastInput {
            date: body.date.unwrap_or_default(),
            temperature_c,
            summary: body.summary.unwrap_or_default(),
        }
    }
}

/// Query parameters for DELETE
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub date: Option<String>,
}

/// Query parameters for PATCH
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub count: Option<u32>,
}

/// GET - List all forecasts
pub async fn list_forecasts(
    State(routes): State<ForecastRoutes>,
) -> ApiResult<Json<Vec<ForecastRecord>>> {
    Ok(Json(routes.service.list()?))
}

/// POST - Create a forecast
pub async fn create_forecast(
    State(routes): State<ForecastRoutes>,
    body: Result<Json<ForecastBody>, JsonRejection>,
) -> ApiResult<Json<ForecastRecord>> {
    let Json(body) = body?;
    let record = routes.service.create(&body.into())?;
    Ok(Json(record))
}

/// PUT - Update the forecast for a date, inserting it if absent
pub async fn update_forecast(
    State(routes): State<ForecastRoutes>,
    body: Result<Json<ForecastBody>, JsonRejection>,
) -> ApiResult<Json<ForecastRecord>> {
    let Json(body) = body?;
    let record = routes.service.update(&body.into())?;
    Ok(Json(record))
}

/// DELETE ?date=YYYY-MM-DD - Remove the forecast for a date
pub async fn delete_forecast(
    State(routes): State<ForecastRoutes>,
    params: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let Query(params) = params?;
    let date = parse_date_param(params.date.as_deref())?;
    routes.service.delete(date)?;
    Ok(StatusCode::OK)
}

/// PATCH ?count=N - Generate forecasts for the coming days
pub async fn generate_forecasts(
    State(routes): State<ForecastRoutes>,
    params: Result<Query<GenerateQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ForecastRecord>>> {
    let Query(params) = params?;
    let count = params.count.unwrap_or(routes.default_count);
    Ok(Json(routes.service.generate(count)?))
}

fn parse_date_param(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    let mut errors = ValidationErrors::new();

    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => errors.add(Field::Date, ValidationError::MissingField(Field::Date)),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => errors.add(Field::Date, ValidationError::InvalidDate),
        },
    }

    Err(ApiError::Validation(errors))
}
