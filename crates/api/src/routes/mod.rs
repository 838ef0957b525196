//! Route handlers

pub mod forecasts;
