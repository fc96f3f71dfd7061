//! HTTP surface: query/body parsing, status mapping and JSON bodies.
//!
//! Handlers stay thin. They check that parameters are present and well formed,
//! call [`WeatherService`](crate::application::services::WeatherService), and
//! turn [`AppError`](crate::error::AppError) into the `{"error": ...}` body.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
