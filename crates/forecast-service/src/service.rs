//! CRUD Service Implementation

use crate::ServiceError;
use chrono::{Local, NaiveDate};
use data_validator::ForecastInput;
use std::sync::Arc;
use storage::{ForecastRecord, ForecastStore};
use tracing::{debug, info, warn};

/// Largest batch `generate` accepts unless configured otherwise
pub const DEFAULT_MAX_GENERATE_COUNT: u32 = 1000;

/// CRUD operations bound to one forecast store
#[derive(Clone)]
pub struct ForecastService {
    store: Arc<ForecastStore>,
    max_generate_count: u32,
}

impl ForecastService {
    /// Create a service over the given store
    pub fn new(store: Arc<ForecastStore>) -> Self {
        Self {
            store,
            max_generate_count: DEFAULT_MAX_GENERATE_COUNT,
        }
    }

    /// Override the largest accepted `generate` batch
    pub fn with_max_generate_count(mut self, max: u32) -> Self {
        self.max_generate_count = max;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &ForecastStore {
        &self.store
    }

    /// All forecasts in insertion order
    pub fn list(&self) -> Result<Vec<ForecastRecord>, ServiceError> {
        debug!("Listing forecasts from '{}'", self.store.name());
        Ok(self.store.list()?)
    }

    /// Validate and append a new forecast
    pub fn create(&self, input: &ForecastInput) -> Result<ForecastRecord, ServiceError> {
        let record = self.validated(input)?;
        self.store.add(record.clone())?;
        info!("Created forecast for {} in '{}'", record.date, self.store.name());
        Ok(record)
    }

    /// Validate, then update the forecast for the same date or insert it
    pub fn update(&self, input: &ForecastInput) -> Result<ForecastRecord, ServiceError> {
        let record = self.validated(input)?;
        let stored = self.store.upsert(record)?;
        info!("Upserted forecast for {} in '{}'", stored.date, self.store.name());
        Ok(stored)
    }

    /// Remove the forecast for a date
    pub fn delete(&self, date: NaiveDate) -> Result<(), ServiceError> {
        if self.store.remove_by_date(date)? {
            info!("Deleted forecast for {} from '{}'", date, self.store.name());
            Ok(())
        } else {
            warn!("Delete of missing forecast {} in '{}'", date, self.store.name());
            Err(ServiceError::NotFound(date))
        }
    }

    /// Generate and store `count` forecasts starting tomorrow
    pub fn generate(&self, count: u32) -> Result<Vec<ForecastRecord>, ServiceError> {
        self.generate_from(count, Local::now().date_naive())
    }

    /// Generate and store `count` forecasts for the days after `today`
    pub fn generate_from(
        &self,
        count: u32,
        today: NaiveDate,
    ) -> Result<Vec<ForecastRecord>, ServiceError> {
        if count > self.max_generate_count {
            warn!("Rejected generate of {} forecasts", count);
            return Err(ServiceError::CountTooLarge {
                requested: count,
                max: self.max_generate_count,
            });
        }

        let Some(batch) = forecast_generator::generate(count, today) else {
            warn!("Rejected generate of {} forecasts after {}", count, today);
            return Err(ServiceError::DateOutOfRange { today, count });
        };
        self.store.extend(batch.iter().cloned())?;
        info!("Generated {} forecasts into '{}'", batch.len(), self.store.name());
        Ok(batch)
    }

    fn validated(&self, input: &ForecastInput) -> Result<ForecastRecord, ServiceError> {
        data_validator::parse(input).map_err(|errors| {
            warn!("Rejected submission to '{}': {}", self.store.name(), errors);
            ServiceError::ValidationFailed(errors)
        })
    }
}
