//! Forecast Generator
//!
//! Produces batches of synthetic forecasts for the days following a given date.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use storage::ForecastRecord;
use tracing::debug;

/// Summary vocabulary, coldest first
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Batch size used when the caller does not ask for one
pub const DEFAULT_COUNT: u32 = 5;

/// Lowest generated temperature (inclusive)
pub const MIN_TEMPERATURE_C: i32 = -20;
/// Highest generated temperature (exclusive)
pub const MAX_TEMPERATURE_C: i32 = 55;

/// Generate `count` forecasts dated `today + 1` through `today + count`.
///
/// Returns `None` when `today + count` is past the last representable date.
pub fn generate(count: u32, today: NaiveDate) -> Option<Vec<ForecastRecord>> {
    generate_with(&mut rand::thread_rng(), count, today)
}

/// Same as [`generate`] with an explicit random source
pub fn generate_with<R: Rng>(
    rng: &mut R,
    count: u32,
    today: NaiveDate,
) -> Option<Vec<ForecastRecord>> {
    today.checked_add_days(Days::new(u64::from(count)))?;

    let batch: Vec<ForecastRecord> = today
        .iter_days()
        .skip(1)
        .take(count as usize)
        .map(|date| {
            let temperature_c = rng.gen_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
            let summary = SUMMARIES.choose(&mut *rng).copied().unwrap_or(SUMMARIES[0]);
            ForecastRecord::new(date, temperature_c, summary)
        })
        .collect();

    debug!("Generated {} forecasts after {}", batch.len(), today);
    Some(batch)
}
