//! Service Error Types

use chrono::NaiveDate;
use data_validator::ValidationErrors;
use storage::StorageError;
use thiserror::Error;

/// Errors returned by CRUD operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted fields failed validation; nothing was written
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// No forecast exists for the date
    #[error("No forecast found for {0}")]
    NotFound(NaiveDate),

    /// Requested batch exceeds the configured limit
    #[error("Cannot generate {requested} forecasts (limit {max})")]
    CountTooLarge { requested: u32, max: u32 },

    /// The batch would run past the last representable date
    #[error("Cannot generate {count} forecasts after {today}: date out of range")]
    DateOutOfRange { today: NaiveDate, count: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
