//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod current_weather;
pub mod forecast;
pub mod health;

pub use current_weather::current_weather_handler;
pub use forecast::{forecast_handler, override_forecast_handler};
pub use health::health_handler;
