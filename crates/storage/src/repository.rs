//! Forecast Store Implementation

use crate::{ForecastRecord, StorageError};
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Ordered in-memory collection of forecast records keyed by date.
///
/// Lookups scan in insertion order and the first record with a matching
/// date wins. Access is serialized by a single mutex, so `upsert` never
/// leaves two records for the same date behind.
pub struct ForecastStore {
    /// Store name, used in logs
    name: String,
    /// Records in insertion order
    records: Mutex<Vec<ForecastRecord>>,
    /// Reject `add` of a date that is already present
    unique_dates: bool,
}

impl ForecastStore {
    /// Create an empty store that tolerates duplicate dates on `add`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        info!("Creating in-memory forecast store '{}'", name);
        Self {
            name,
            records: Mutex::new(Vec::new()),
            unique_dates: false,
        }
    }

    /// Create an empty store that rejects duplicate dates on `add`
    pub fn with_unique_dates(name: impl Into<String>) -> Self {
        Self {
            unique_dates: true,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ForecastRecord>>, StorageError> {
        self.records
            .lock()
            .map_err(|e| StorageError::Lock(format!("{}: {}", self.name, e)))
    }

    /// All records in insertion order
    pub fn list(&self) -> Result<Vec<ForecastRecord>, StorageError> {
        let records = self.lock()?;
        debug!("Listing {} records from '{}'", records.len(), self.name);
        Ok(records.clone())
    }

    /// Append a record
    pub fn add(&self, record: ForecastRecord) -> Result<(), StorageError> {
        let mut records = self.lock()?;

        if self.unique_dates && records.iter().any(|r| r.date == record.date) {
            return Err(StorageError::DuplicateKey(record.date));
        }

        debug!("Adding forecast for {} to '{}'", record.date, self.name);
        records.push(record);
        Ok(())
    }

    /// Append a batch of records under one lock
    pub fn extend(
        &self,
        batch: impl IntoIterator<Item = ForecastRecord>,
    ) -> Result<(), StorageError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.extend(batch);
        debug!("Appended {} records to '{}'", records.len() - before, self.name);
        Ok(())
    }

    /// First record with the given date
    pub fn find_by_date(&self, date: NaiveDate) -> Result<Option<ForecastRecord>, StorageError> {
        let records = self.lock()?;
        Ok(records.iter().find(|r| r.date == date).cloned())
    }

    /// Update the first record with the same date in place, or append.
    ///
    /// Returns the record as stored after the call.
    pub fn upsert(&self, record: ForecastRecord) -> Result<ForecastRecord, StorageError> {
        let mut records = self.lock()?;

        if let Some(existing) = records.iter_mut().find(|r| r.date == record.date) {
            existing.temperature_c = record.temperature_c;
            existing.summary = record.summary;
            debug!("Updated forecast for {} in '{}'", existing.date, self.name);
            return Ok(existing.clone());
        }

        debug!("Inserted forecast for {} into '{}'", record.date, self.name);
        records.push(record.clone());
        Ok(record)
    }

    /// Remove the first record with the given date
    pub fn remove_by_date(&self, date: NaiveDate) -> Result<bool, StorageError> {
        let mut records = self.lock()?;

        match records.iter().position(|r| r.date == date) {
            Some(index) => {
                records.remove(index);
                debug!("Removed forecast for {} from '{}'", date, self.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all data (for testing)
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Default for ForecastStore {
    fn default() -> Self {
        Self::new("default")
    }
}
