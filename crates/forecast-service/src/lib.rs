//! Forecast CRUD Service
//!
//! Validates submissions and applies them to one injected forecast store.
//! Both backend routes run the same service over different stores.

mod error;
mod service;

pub use error::ServiceError;
pub use service::{ForecastService, DEFAULT_MAX_GENERATE_COUNT};
