//! Repository trait for forecast overrides.

use crate::domain::entities::{NewForecastOverride, OverriddenForecast};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface for manual forecast overrides.
///
/// Records are unique per `(city, date)`. City matching is exact and
/// case-sensitive.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgForecastOverrideRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryForecastOverrideRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_forecast_override.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastOverrideRepository: Send + Sync {
    /// Creates the override for `(city, date)` or replaces its temperatures.
    ///
    /// Performs no validation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn upsert(&self, new_override: NewForecastOverride)
    -> Result<OverriddenForecast, AppError>;

    /// Finds the override for an exact `(city, date)` match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, city: &str, date: NaiveDate)
    -> Result<Option<OverriddenForecast>, AppError>;

    /// Lists overrides ordered by date then city, optionally for one city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, city: Option<String>) -> Result<Vec<OverriddenForecast>, AppError>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name used in health reports.
    fn backend_name(&self) -> &'static str;
}
