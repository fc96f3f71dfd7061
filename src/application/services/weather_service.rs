//! Weather lookup and forecast override service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    CurrentWeather, ForecastTemperatures, NewForecastOverride, OverriddenForecast,
};
use crate::domain::provider::WeatherProvider;
use crate::domain::repositories::ForecastOverrideRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, keys};
use crate::utils::forecast_validation::{check_date_window, check_temperature_range, format_date};

/// Serves current weather and forecasts, and records forecast overrides.
///
/// Lookup order for forecasts:
/// 1. Override store (exact, case-sensitive city match)
/// 2. Cache (lowercased city)
/// 3. Weather provider, whose result is cached for `cache_ttl_seconds`
///
/// Cache failures never fail a request; they are treated as misses.
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    overrides: Arc<dyn ForecastOverrideRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl WeatherService {
    /// Creates a new weather service.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        overrides: Arc<dyn ForecastOverrideRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            provider,
            overrides,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Returns the current weather for `city`, from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Provider`] if the provider lookup fails.
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, AppError> {
        let key = keys::current_weather(city);

        if let Some(cached) = self.cached::<CurrentWeather>(&key).await {
            return Ok(cached);
        }

        let weather = self.provider.get_current_weather(city).await?;
        self.store(&key, &weather).await;

        Ok(weather)
    }

    /// Returns the forecast for `city` on `date`.
    ///
    /// # Errors
    ///
    /// - [`AppError::DateOutOfRange`] if `date` is outside `[today, today + 10]`
    /// - [`AppError::Provider`] if the provider lookup fails
    /// - [`AppError::Internal`] on override store errors
    pub async fn forecast(
        &self,
        city: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<ForecastTemperatures, AppError> {
        check_date_window(date, today)?;

        if let Some(record) = self.overrides.find(city, date).await? {
            debug!("Serving override #{} for '{}' on {}", record.id, city, date);
            return Ok(record.temperatures());
        }

        let key = keys::forecast(city, date);

        if let Some(cached) = self.cached::<ForecastTemperatures>(&key).await {
            return Ok(cached);
        }

        let forecast = self
            .provider
            .get_forecast(city, &format_date(date))
            .await?;
        self.store(&key, &forecast).await;

        Ok(forecast)
    }

    /// Creates or replaces the override for a city and date.
    ///
    /// Drops any cached provider forecast for the same key so the override is
    /// visible immediately regardless of how the city is cased on lookup.
    ///
    /// # Errors
    ///
    /// - [`AppError::TemperatureRangeInvalid`] if min exceeds max
    /// - [`AppError::DateOutOfRange`] if the date is outside `[today, today + 10]`
    /// - [`AppError::Internal`] on override store errors
    pub async fn override_forecast(
        &self,
        new_override: NewForecastOverride,
        today: NaiveDate,
    ) -> Result<OverriddenForecast, AppError> {
        check_temperature_range(new_override.min_temperature, new_override.max_temperature)?;
        check_date_window(new_override.date, today)?;

        let key = keys::forecast(&new_override.city, new_override.date);
        let record = self.overrides.upsert(new_override).await?;

        info!(
            "Forecast override #{} set for '{}' on {}: {}..{}",
            record.id, record.city, record.date, record.min_temperature, record.max_temperature
        );

        if let Err(e) = self.cache.invalidate(&key).await {
            warn!("Failed to invalidate cache key {}: {}", key, e);
        }

        Ok(record)
    }

    /// Checks whether the override store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.overrides.health_check().await
    }

    pub fn store_backend(&self) -> &'static str {
        self.overrides.backend_name()
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set(key, &raw, Some(self.cache_ttl_seconds))
            .await
        {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::{MockWeatherProvider, ProviderError};
    use crate::domain::repositories::MockForecastOverrideRepository;
    use crate::infrastructure::cache::MemoryCache;
    use crate::utils::forecast_validation::DateRangeError;
    use chrono::{Days, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn in_days(n: u64) -> NaiveDate {
        today().checked_add_days(Days::new(n)).unwrap()
    }

    fn record(city: &str, date: NaiveDate, min: f64, max: f64) -> OverriddenForecast {
        OverriddenForecast::new(1, city.to_string(), date, min, max, Utc::now(), Utc::now())
    }

    fn service(
        provider: MockWeatherProvider,
        overrides: MockForecastOverrideRepository,
        cache: Arc<MemoryCache>,
    ) -> WeatherService {
        WeatherService::new(Arc::new(provider), Arc::new(overrides), cache, 600)
    }

    #[tokio::test]
    async fn test_current_weather_is_cached() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_current_weather()
            .withf(|city| city == "London")
            .times(1)
            .returning(|_| {
                Ok(CurrentWeather {
                    temperature: 14.2,
                    local_time: "09:30".to_string(),
                })
            });
        let cache = Arc::new(MemoryCache::new(600));
        let service = service(provider, MockForecastOverrideRepository::new(), cache.clone());

        let first = service.current_weather("London").await.unwrap();
        let second = service.current_weather("london").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.temperature, 14.2);
        assert!(cache.get("current_weather_london").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_current_weather_provider_error() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_current_weather()
            .times(1)
            .returning(|_| Err(ProviderError::CityNotFound));
        let cache = Arc::new(MemoryCache::new(600));
        let service = service(provider, MockForecastOverrideRepository::new(), cache.clone());

        let result = service.current_weather("Atlantis").await;

        assert!(matches!(
            result,
            Err(AppError::Provider(ProviderError::CityNotFound))
        ));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_forecast_prefers_override() {
        let date = in_days(2);
        let mut overrides = MockForecastOverrideRepository::new();
        overrides
            .expect_find()
            .withf(move |city, d| city == "Paris" && *d == date)
            .times(1)
            .returning(move |_, _| Ok(Some(record("Paris", date, 10.0, 18.0))));
        let provider = MockWeatherProvider::new();
        let service = service(provider, overrides, Arc::new(MemoryCache::new(600)));

        let forecast = service.forecast("Paris", date, today()).await.unwrap();

        assert_eq!(forecast.min_temperature, 10.0);
        assert_eq!(forecast.max_temperature, 18.0);
    }

    #[tokio::test]
    async fn test_forecast_falls_back_to_provider_and_caches() {
        let date = in_days(3);
        let mut overrides = MockForecastOverrideRepository::new();
        overrides.expect_find().times(2).returning(|_, _| Ok(None));
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_forecast()
            .withf(|city, date_str| city == "Rome" && date_str == "19.10.2026")
            .times(1)
            .returning(|_, _| {
                Ok(ForecastTemperatures {
                    min_temperature: 15.5,
                    max_temperature: 23.0,
                })
            });
        let cache = Arc::new(MemoryCache::new(600));
        let service = service(provider, overrides, cache.clone());

        let first = service.forecast("Rome", date, today()).await.unwrap();
        let second = service.forecast("Rome", date, today()).await.unwrap();

        assert_eq!(first, second);
        assert!(cache.get("forecast_rome_19.10.2026").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_forecast_rejects_out_of_window_dates_before_lookups() {
        let service = service(
            MockWeatherProvider::new(),
            MockForecastOverrideRepository::new(),
            Arc::new(MemoryCache::new(600)),
        );
        let yesterday = today().pred_opt().unwrap();

        let past = service.forecast("Paris", yesterday, today()).await;
        let far = service.forecast("Paris", in_days(11), today()).await;

        assert!(matches!(
            past,
            Err(AppError::DateOutOfRange(DateRangeError::InPast))
        ));
        assert!(matches!(
            far,
            Err(AppError::DateOutOfRange(DateRangeError::TooFarAhead))
        ));
    }

    #[tokio::test]
    async fn test_override_rejects_inverted_temperatures() {
        let service = service(
            MockWeatherProvider::new(),
            MockForecastOverrideRepository::new(),
            Arc::new(MemoryCache::new(600)),
        );

        let result = service
            .override_forecast(
                NewForecastOverride {
                    city: "Paris".to_string(),
                    date: in_days(1),
                    min_temperature: 20.0,
                    max_temperature: 10.0,
                },
                today(),
            )
            .await;

        assert!(matches!(result, Err(AppError::TemperatureRangeInvalid)));
    }

    #[tokio::test]
    async fn test_override_rejects_past_date() {
        let service = service(
            MockWeatherProvider::new(),
            MockForecastOverrideRepository::new(),
            Arc::new(MemoryCache::new(600)),
        );

        let result = service
            .override_forecast(
                NewForecastOverride {
                    city: "Paris".to_string(),
                    date: today().pred_opt().unwrap(),
                    min_temperature: 10.0,
                    max_temperature: 18.0,
                },
                today(),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::DateOutOfRange(DateRangeError::InPast))
        ));
    }

    #[tokio::test]
    async fn test_override_upserts_and_invalidates_cache() {
        let date = in_days(2);
        let mut overrides = MockForecastOverrideRepository::new();
        overrides
            .expect_upsert()
            .withf(move |o| o.city == "Paris" && o.date == date)
            .times(1)
            .returning(|o| Ok(record(&o.city, o.date, o.min_temperature, o.max_temperature)));
        let cache = Arc::new(MemoryCache::new(600));
        cache
            .set("forecast_paris_18.10.2026", r#"{"min_temperature":1.0,"max_temperature":2.0}"#, None)
            .await
            .unwrap();
        let service = service(MockWeatherProvider::new(), overrides, cache.clone());

        let stored = service
            .override_forecast(
                NewForecastOverride {
                    city: "Paris".to_string(),
                    date,
                    min_temperature: 10.0,
                    max_temperature: 18.0,
                },
                today(),
            )
            .await
            .unwrap();

        assert_eq!(stored.min_temperature, 10.0);
        assert_eq!(stored.max_temperature, 18.0);
        assert_eq!(cache.get("forecast_paris_18.10.2026").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut overrides = MockForecastOverrideRepository::new();
        overrides
            .expect_find()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error")));
        let service = service(
            MockWeatherProvider::new(),
            overrides,
            Arc::new(MemoryCache::new(600)),
        );

        let result = service.forecast("Paris", in_days(1), today()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
