//! Weather provider clients.
//!
//! - [`WeatherApiClient`] - WeatherAPI.com (`current.json`, `forecast.json`)

mod weatherapi;

pub use weatherapi::{DEFAULT_BASE_URL, WeatherApiClient};
