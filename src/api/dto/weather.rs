//! DTOs for the current weather endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::CurrentWeather;

/// Query parameters for `GET /weather/current`.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    pub city: Option<String>,
}

/// Current temperature (°C) and local time of day (`HH:MM`).
#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub temperature: f64,
    pub local_time: String,
}

impl From<CurrentWeather> for CurrentWeatherResponse {
    fn from(w: CurrentWeather) -> Self {
        Self {
            temperature: w.temperature,
            local_time: w.local_time,
        }
    }
}
