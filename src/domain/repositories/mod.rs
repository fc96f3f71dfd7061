//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ForecastOverrideRepository`] - Manual forecast overrides keyed by city and date

pub mod forecast_override_repository;

pub use forecast_override_repository::ForecastOverrideRepository;

#[cfg(test)]
pub use forecast_override_repository::MockForecastOverrideRepository;
