//! Forecast Record

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Conventional upper bound on summary length (characters)
pub const MAX_SUMMARY_LEN: usize = 100;

/// Convert Celsius to Fahrenheit, truncating toward zero.
///
/// Uses the 0.5556 divisor, so 100°C reports as 211°F. Results beyond the
/// `i32` range saturate at its bounds.
pub fn temperature_f(temperature_c: i32) -> i32 {
    (32.0 + (f64::from(temperature_c) / 0.5556).trunc()) as i32
}

/// One forecast entry, keyed by date within a store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: String,
}

impl ForecastRecord {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: impl Into<String>) -> Self {
        Self {
            date,
            temperature_c,
            summary: summary.into(),
        }
    }

    /// Derived Fahrenheit temperature
    pub fn temperature_f(&self) -> i32 {
        temperature_f(self.temperature_c)
    }
}

// temperatureF is emitted on output only; deserialization ignores it.
impl Serialize for ForecastRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ForecastRecord", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("temperatureC", &self.temperature_c)?;
        state.serialize_field("temperatureF", &self.temperature_f())?;
        state.serialize_field("summary", &self.summary)?;
        state.end()
    }
}
