//! Business logic services for the application layer.

pub mod weather_service;

pub use weather_service::WeatherService;
