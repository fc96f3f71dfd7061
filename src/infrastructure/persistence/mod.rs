//! Override store implementations.
//!
//! # Repositories
//!
//! - [`PgForecastOverrideRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryForecastOverrideRepository`] - Process-local storage used when no
//!   database is configured

pub mod memory_forecast_override_repository;
pub mod pg_forecast_override_repository;

pub use memory_forecast_override_repository::InMemoryForecastOverrideRepository;
pub use pg_forecast_override_repository::PgForecastOverrideRepository;
