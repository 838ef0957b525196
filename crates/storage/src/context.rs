//! Data Context

use crate::ForecastStore;
use std::sync::Arc;

/// The two independent forecast stores served side by side
#[derive(Clone)]
pub struct DataContext {
    pub weather_forecasts: Arc<ForecastStore>,
    pub second_source_forecasts: Arc<ForecastStore>,
}

impl DataContext {
    /// Create a context with empty stores
    pub fn new(unique_dates: bool) -> Self {
        let store = |name: &str| {
            if unique_dates {
                Arc::new(ForecastStore::with_unique_dates(name))
            } else {
                Arc::new(ForecastStore::new(name))
            }
        };

        Self {
            weather_forecasts: store("WeatherForecasts"),
            second_source_forecasts: store("SecondSourceForecasts"),
        }
    }
}

impl Default for DataContext {
    fn default() -> Self {
        Self::new(false)
    }
}
