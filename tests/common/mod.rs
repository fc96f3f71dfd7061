#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Days, NaiveDate};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use weather_service::application::services::WeatherService;
use weather_service::infrastructure::cache::MemoryCache;
use weather_service::infrastructure::persistence::InMemoryForecastOverrideRepository;
use weather_service::infrastructure::provider::WeatherApiClient;
use weather_service::routes::api_router;
use weather_service::state::AppState;
use weather_service::utils::forecast_validation::{format_date, today};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-key";

/// Builds application state backed by the in-memory store and cache, with the
/// provider pointed at `provider`.
pub fn create_test_state(provider: &MockServer) -> AppState {
    let client = WeatherApiClient::new(&provider.uri(), TEST_API_KEY, Duration::from_secs(5))
        .expect("provider client");
    let cache = Arc::new(MemoryCache::new(600));

    let weather_service = Arc::new(WeatherService::new(
        Arc::new(client),
        Arc::new(InMemoryForecastOverrideRepository::new()),
        cache.clone(),
        600,
    ));

    AppState::new(weather_service, cache)
}

pub fn make_server(provider: &MockServer) -> TestServer {
    TestServer::new(api_router(create_test_state(provider))).unwrap()
}

/// Today plus `n` days.
pub fn in_days(n: u64) -> NaiveDate {
    today().checked_add_days(Days::new(n)).unwrap()
}

/// Today minus `n` days.
pub fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
}

/// `dd.mm.yyyy` for today plus `n` days.
pub fn date_in(n: u64) -> String {
    format_date(in_days(n))
}

pub fn current_body(temp_c: f64, localtime: &str) -> Value {
    json!({
        "location": { "name": "London", "localtime": localtime },
        "current": { "temp_c": temp_c, "condition": { "text": "Sunny" } }
    })
}

pub fn forecast_body(mintemp_c: f64, maxtemp_c: f64) -> Value {
    json!({
        "location": { "name": "Paris" },
        "forecast": {
            "forecastday": [
                { "date": "2026-10-18", "day": { "mintemp_c": mintemp_c, "maxtemp_c": maxtemp_c } }
            ]
        }
    })
}

pub fn provider_error_body() -> Value {
    json!({ "error": { "code": 1006, "message": "No matching location found." } })
}

/// Mounts a `current.json` response for `city`, expecting exactly `calls` hits.
pub async fn mount_current(server: &MockServer, city: &str, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// Mounts a `forecast.json` response for `city`, expecting exactly `calls` hits.
pub async fn mount_forecast(server: &MockServer, city: &str, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}
