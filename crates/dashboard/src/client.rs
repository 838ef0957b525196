//! HTTP client for one forecast route

use chrono::NaiveDate;
use data_validator::ValidationErrors;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use storage::ForecastRecord;
use thiserror::Error;
use tracing::debug;

/// Errors from a forecast request
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed or the reply could not be read
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server rejected the submitted fields
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Wire body for POST and PUT; Fahrenheit is never sent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPayload<'a> {
    date: NaiveDate,
    temperature_c: i32,
    summary: &'a str,
}

impl<'a> From<&'a ForecastRecord> for ForecastPayload<'a> {
    fn from(record: &'a ForecastRecord) -> Self {
        Self {
            date: record.date,
            temperature_c: record.temperature_c,
            summary: &record.summary,
        }
    }
}

/// Error body returned by the API
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<ValidationErrors>,
}

/// Client bound to one forecast collection URL
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ForecastClient {
    /// `base_url` like `http://127.0.0.1:5000`, `route` like `weatherforecast`
    pub fn new(base_url: &str, route: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                route.trim_start_matches('/')
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET all forecasts
    pub async fn list(&self) -> Result<Vec<ForecastRecord>, ClientError> {
        let response = self.http.get(&self.endpoint).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// POST a new forecast
    pub async fn create(&self, record: &ForecastRecord) -> Result<ForecastRecord, ClientError> {
        debug!("POST {} for {}", self.endpoint, record.date);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ForecastPayload::from(record))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT a forecast, updating or inserting by date
    pub async fn update(&self, record: &ForecastRecord) -> Result<ForecastRecord, ClientError> {
        debug!("PUT {} for {}", self.endpoint, record.date);
        let response = self
            .http
            .put(&self.endpoint)
            .json(&ForecastPayload::from(record))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// DELETE the forecast for a date
    pub async fn delete(&self, date: NaiveDate) -> Result<(), ClientError> {
        debug!("DELETE {} for {}", self.endpoint, date);
        let response = self
            .http
            .delete(&self.endpoint)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// PATCH to generate `count` forecasts
    pub async fn generate(&self, count: u32) -> Result<Vec<ForecastRecord>, ClientError> {
        let response = self
            .http
            .patch(&self.endpoint)
            .query(&[("count", count)])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    let message = body.message.unwrap_or_else(|| status.to_string());

    Err(match (status, body.errors) {
        (StatusCode::BAD_REQUEST, Some(errors)) => ClientError::Validation(errors),
        (StatusCode::NOT_FOUND, _) => ClientError::NotFound(message),
        _ => ClientError::Status {
            status: status.as_u16(),
            message,
        },
    })
}
