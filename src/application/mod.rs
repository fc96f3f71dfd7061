//! Application layer services implementing business logic.
//!
//! Services coordinate the override store, the cache, and the weather provider,
//! and apply the shared validation rules. HTTP handlers call services; they never
//! talk to infrastructure directly.
//!
//! # Available Services
//!
//! - [`services::weather_service::WeatherService`] - Current weather, forecasts, and overrides

pub mod services;
