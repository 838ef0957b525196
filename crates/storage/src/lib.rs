//! Storage Layer
//!
//! Provides the in-memory forecast stores with repository semantics.

mod context;
mod record;
mod repository;

pub use context::DataContext;
pub use record::{temperature_f, ForecastRecord, MAX_SUMMARY_LEN};
pub use repository::ForecastStore;

use chrono::NaiveDate;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Lock error: {0}")]
    Lock(String),
    #[error("A forecast for {0} already exists")]
    DuplicateKey(NaiveDate),
}
