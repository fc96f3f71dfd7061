//! Normalized weather payloads returned by the provider and cached as JSON.

use serde::{Deserialize, Serialize};

/// Current temperature and the city's local time of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Local time of day in `HH:MM`.
    pub local_time: String,
}

/// Minimum and maximum temperature forecast for a single day, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastTemperatures {
    pub min_temperature: f64,
    pub max_temperature: f64,
}
