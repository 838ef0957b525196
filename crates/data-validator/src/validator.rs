//! Form Validator

use crate::error::{Field, ValidationError, ValidationErrors};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use storage::ForecastRecord;
use tracing::debug;

/// Raw forecast form fields, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastInput {
    pub date: String,
    pub temperature_c: String,
    pub summary: String,
}

impl ForecastInput {
    pub fn new(
        date: impl Into<String>,
        temperature_c: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            temperature_c: temperature_c.into(),
            summary: summary.into(),
        }
    }
}

impl From<&ForecastRecord> for ForecastInput {
    fn from(record: &ForecastRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            temperature_c: record.temperature_c.to_string(),
            summary: record.summary.clone(),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(Field::Date));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// Integers parse directly; other finite numbers truncate toward zero.
fn parse_temperature(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(Field::TemperatureC));
    }
    if let Ok(value) = raw.parse::<i32>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.trunc() >= f64::from(i32::MIN)
                && value.trunc() <= f64::from(i32::MAX) =>
        {
            Ok(value.trunc() as i32)
        }
        _ => Err(ValidationError::NotANumber),
    }
}

fn check_summary(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        Err(ValidationError::MissingField(Field::Summary))
    } else {
        Ok(())
    }
}

/// Check every field and collect the failures
pub fn validate(input: &ForecastInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Err(e) = parse_date(&input.date) {
        errors.add(Field::Date, e);
    }
    if let Err(e) = parse_temperature(&input.temperature_c) {
        errors.add(Field::TemperatureC, e);
    }
    if let Err(e) = check_summary(&input.summary) {
        errors.add(Field::Summary, e);
    }

    if !errors.is_empty() {
        debug!("Rejected forecast input: {}", errors);
    }
    errors
}

/// Validate and convert into a record
pub fn parse(input: &ForecastInput) -> Result<ForecastRecord, ValidationErrors> {
    match (
        parse_date(&input.date),
        parse_temperature(&input.temperature_c),
        check_summary(&input.summary),
    ) {
        (Ok(date), Ok(temperature_c), Ok(())) => {
            Ok(ForecastRecord::new(date, temperature_c, input.summary.clone()))
        }
        _ => Err(validate(input)),
    }
}
