//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`OverriddenForecast`] - An operator-supplied forecast stored for a city and date
//! - [`CurrentWeather`] - Normalized current conditions from the provider
//! - [`ForecastTemperatures`] - Normalized min/max forecast for one day
//!
//! Overrides follow the "New Type" pattern with [`NewForecastOverride`] as the
//! write model.

pub mod forecast_override;
pub mod weather;

pub use forecast_override::{NewForecastOverride, OverriddenForecast};
pub use weather::{CurrentWeather, ForecastTemperatures};
