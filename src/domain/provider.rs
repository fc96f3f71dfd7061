//! Weather provider contract.
//!
//! The service depends on this trait rather than on a concrete HTTP client so
//! the provider can be replaced by a mock in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{CurrentWeather, ForecastTemperatures};

/// Failures reported by a weather provider.
///
/// Messages are shown to API clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Invalid date format. Expected dd.MM.yyyy")]
    InvalidDateFormat,

    /// The current-weather endpoint answered with a non-success status.
    #[error("City not found or external API error.")]
    CityNotFound,

    /// The forecast endpoint answered with a non-success status.
    #[error("City not found or forecast not available.")]
    ForecastUnavailable,

    /// The forecast response carried no day for the requested date.
    #[error("No forecast data available for the requested date.")]
    MissingForecastDay,

    #[error("Unexpected response from weather provider: {0}")]
    MalformedResponse(String),

    #[error("Weather provider request failed: {0}")]
    Transport(String),
}

/// Source of live weather data.
///
/// # Implementations
///
/// - [`crate::infrastructure::provider::WeatherApiClient`] - WeatherAPI.com over HTTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current temperature and local time for `city`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::CityNotFound`] if the provider rejects the request.
    async fn get_current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError>;

    /// Fetches the min/max forecast for `city` on `date_str` (`dd.mm.yyyy`).
    ///
    /// # Errors
    ///
    /// - [`ProviderError::InvalidDateFormat`] if `date_str` is not `dd.mm.yyyy`
    /// - [`ProviderError::ForecastUnavailable`] if the provider rejects the request
    /// - [`ProviderError::MissingForecastDay`] if no forecast day is returned
    async fn get_forecast(
        &self,
        city: &str,
        date_str: &str,
    ) -> Result<ForecastTemperatures, ProviderError>;
}
