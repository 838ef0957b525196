//! Forecast Input Validation
//!
//! Checks submitted form fields before a forecast is accepted and reports
//! problems as a per-field message map.

mod error;
mod validator;

pub use error::{Field, ValidationError, ValidationErrors};
pub use validator::{parse, validate, ForecastInput};
