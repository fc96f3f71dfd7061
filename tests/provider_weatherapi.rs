use serde_json::json;
use std::time::Duration;
use weather_service::domain::provider::{ProviderError, WeatherProvider};
use weather_service::infrastructure::provider::WeatherApiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::new(&server.uri(), "secret", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_current_weather_parses_local_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "secret"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "London", "localtime": "2026-10-16 16:45" },
            "current": { "temp_c": 22.1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let weather = client(&server).get_current_weather("London").await.unwrap();

    assert_eq!(weather.temperature, 22.1);
    assert_eq!(weather.local_time, "16:45");
}

#[tokio::test]
async fn test_current_weather_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_current_weather("London")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::CityNotFound);
}

#[tokio::test]
async fn test_current_weather_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "current": {} })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_forecast_converts_date_for_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "secret"))
        .and(query_param("q", "Paris"))
        .and(query_param("dt", "2026-10-18"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "forecast": {
                "forecastday": [
                    { "date": "2026-10-18", "day": { "mintemp_c": 11.1, "maxtemp_c": 24.5 } },
                    { "date": "2026-10-19", "day": { "mintemp_c": 0.0, "maxtemp_c": 1.0 } }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = client(&server)
        .get_forecast("Paris", "18.10.2026")
        .await
        .unwrap();

    assert_eq!(forecast.min_temperature, 11.1);
    assert_eq!(forecast.max_temperature, 24.5);
}

#[tokio::test]
async fn test_forecast_rejects_bad_date_without_calling_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .get_forecast("Paris", "2026-10-18")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::InvalidDateFormat);
}

#[tokio::test]
async fn test_forecast_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_forecast("Atlantis", "18.10.2026")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::ForecastUnavailable);
}

#[tokio::test]
async fn test_forecast_without_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "forecast": { "forecastday": [] } })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .get_forecast("Paris", "18.10.2026")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::MissingForecastDay);
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let client =
        WeatherApiClient::new("http://127.0.0.1:1", "secret", Duration::from_secs(2)).unwrap();
    let err = client.get_current_weather("London").await.unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}
