//! WeatherAPI.com client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::entities::{CurrentWeather, ForecastTemperatures};
use crate::domain::provider::{ProviderError, WeatherProvider};
use crate::utils::forecast_validation::parse_date;

/// Public WeatherAPI.com endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Date format the provider expects in the `dt` parameter.
const PROVIDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for WeatherAPI.com.
///
/// Each call is a single request: no retries. The underlying client enforces the
/// configured request timeout.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CurrentResponse {
    location: Location,
    current: Current,
}

#[derive(Deserialize)]
struct Location {
    /// `YYYY-MM-DD HH:MM`
    localtime: String,
}

#[derive(Deserialize)]
struct Current {
    temp_c: f64,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    forecast: Option<Forecast>,
}

#[derive(Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Deserialize)]
struct ForecastDay {
    day: DaySummary,
}

#[derive(Deserialize)]
struct DaySummary {
    mintemp_c: f64,
    maxtemp_c: f64,
}

impl WeatherApiClient {
    /// Creates a client for the API at `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn send(&self, name: &str, query: &[(&str, &str)]) -> Result<Response, ProviderError> {
        self.client
            .get(self.endpoint(name))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!("Weather provider request to {} failed: {}", name, e);
                ProviderError::Transport(e.to_string())
            })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// Extracts `HH:MM` from the provider's `YYYY-MM-DD HH:MM` local time.
fn time_of_day(localtime: &str) -> Option<&str> {
    localtime
        .split_once(' ')
        .map(|(_, time)| time.trim())
        .filter(|time| !time.is_empty())
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn get_current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        let response = self.send("current.json", &[("q", city)]).await?;

        if !response.status().is_success() {
            warn!(
                "Current weather lookup for '{}' failed with status {}",
                city,
                response.status()
            );
            return Err(ProviderError::CityNotFound);
        }

        let body: CurrentResponse = decode(response).await?;
        let local_time = time_of_day(&body.location.localtime).ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "unexpected localtime '{}'",
                body.location.localtime
            ))
        })?;

        debug!("Fetched current weather for '{}'", city);

        Ok(CurrentWeather {
            temperature: body.current.temp_c,
            local_time: local_time.to_string(),
        })
    }

    async fn get_forecast(
        &self,
        city: &str,
        date_str: &str,
    ) -> Result<ForecastTemperatures, ProviderError> {
        let date = parse_date(date_str).map_err(|_| ProviderError::InvalidDateFormat)?;
        let dt = date.format(PROVIDER_DATE_FORMAT).to_string();

        let response = self
            .send("forecast.json", &[("q", city), ("dt", dt.as_str())])
            .await?;

        if !response.status().is_success() {
            warn!(
                "Forecast lookup for '{}' on {} failed with status {}",
                city,
                dt,
                response.status()
            );
            return Err(ProviderError::ForecastUnavailable);
        }

        let body: ForecastResponse = decode(response).await?;
        let day = body
            .forecast
            .and_then(|f| f.forecastday.into_iter().next())
            .ok_or(ProviderError::MissingForecastDay)?
            .day;

        debug!("Fetched forecast for '{}' on {}", city, dt);

        Ok(ForecastTemperatures {
            min_temperature: day.mintemp_c,
            max_temperature: day.maxtemp_c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day("2026-10-16 16:45"), Some("16:45"));
        assert_eq!(time_of_day("2026-10-16 9:05"), Some("9:05"));
        assert_eq!(time_of_day("2026-10-16"), None);
        assert_eq!(time_of_day("2026-10-16 "), None);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client =
            WeatherApiClient::new("http://localhost:8080/v1/", "key", Duration::from_secs(5))
                .unwrap();

        assert_eq!(
            client.endpoint("current.json"),
            "http://localhost:8080/v1/current.json"
        );
    }

    #[tokio::test]
    async fn test_forecast_rejects_bad_date_before_request() {
        let client =
            WeatherApiClient::new("http://127.0.0.1:9", "key", Duration::from_secs(1)).unwrap();

        let result = client.get_forecast("Paris", "2026-10-18").await;

        assert_eq!(result, Err(ProviderError::InvalidDateFormat));
    }
}
