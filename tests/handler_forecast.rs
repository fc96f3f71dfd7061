mod common;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_forecast_success() {
    let provider = MockServer::start().await;
    let date = common::in_days(2);
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Paris"))
        .and(query_param("dt", date.format("%Y-%m-%d").to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::forecast_body(11.1, 24.5)))
        .expect(1)
        .mount(&provider)
        .await;
    let server = common::make_server(&provider);

    let response = server
        .get("/weather/forecast")
        .add_query_param("city", "Paris")
        .add_query_param("date", common::date_in(2))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "min_temperature": 11.1, "max_temperature": 24.5 }));
}

#[tokio::test]
async fn test_forecast_today_and_last_day_are_accepted() {
    let provider = MockServer::start().await;
    common::mount_forecast(&provider, "Paris", common::forecast_body(5.0, 12.0), 2).await;
    let server = common::make_server(&provider);

    for offset in [0, 10] {
        server
            .get("/weather/forecast")
            .add_query_param("city", "Paris")
            .add_query_param("date", common::date_in(offset))
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_forecast_missing_parameters() {
    let provider = MockServer::start().await;
    let server = common::make_server(&provider);

    let expected = json!({ "error": "Missing 'city' or 'date' query parameter" });

    let no_date = server
        .get("/weather/forecast")
        .add_query_param("city", "Paris")
        .await;
    no_date.assert_status_bad_request();
    no_date.assert_json(&expected);

    let no_city = server
        .get("/weather/forecast")
        .add_query_param("date", common::date_in(1))
        .await;
    no_city.assert_status_bad_request();
    no_city.assert_json(&expected);
}

#[tokio::test]
async fn test_forecast_invalid_date_format() {
    let provider = MockServer::start().await;
    let server = common::make_server(&provider);

    for raw in ["2026-10-18", "31.02.2026", "tomorrow"] {
        let response = server
            .get("/weather/forecast")
            .add_query_param("city", "Paris")
            .add_query_param("date", raw)
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "Invalid date format. Expected dd.MM.yyyy" }));
    }
}

#[tokio::test]
async fn test_forecast_date_in_past() {
    let provider = MockServer::start().await;
    let server = common::make_server(&provider);

    let response = server
        .get("/weather/forecast")
        .add_query_param("city", "Paris")
        .add_query_param("date", common::days_ago(1).format("%d.%m.%Y").to_string())
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Date cannot be in the past" }));
}

#[tokio::test]
async fn test_forecast_date_too_far_ahead() {
    let provider = MockServer::start().await;
    let server = common::make_server(&provider);

    let response = server
        .get("/weather/forecast")
        .add_query_param("city", "Paris")
        .add_query_param("date", common::date_in(11))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Date cannot be more than 10 days in the future" }));
}

#[tokio::test]
async fn test_forecast_provider_error_is_bad_request() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(common::provider_error_body()))
        .mount(&provider)
        .await;
    let server = common::make_server(&provider);

    let response = server
        .get("/weather/forecast")
        .add_query_param("city", "Atlantis")
        .add_query_param("date", common::date_in(1))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "City not found or forecast not available." }));
}

#[tokio::test]
async fn test_forecast_without_forecast_days_is_bad_request() {
    let provider = MockServer::start().await;
    common::mount_forecast(
        &provider,
        "Paris",
        json!({ "forecast": { "forecastday": [] } }),
        1,
    )
    .await;
    let server = common::make_server(&provider);

    let response = server
        .get("/weather/forecast")
        .add_query_param("city", "Paris")
        .add_query_param("date", common::date_in(1))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "No forecast data available for the requested date." }));
}

#[tokio::test]
async fn test_forecast_is_cached() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::forecast_body(3.0, 9.5)))
        .expect(1)
        .mount(&provider)
        .await;
    let server = common::make_server(&provider);
    let date = common::date_in(3);

    for city in ["Oslo", "oslo"] {
        let response = server
            .get("/weather/forecast")
            .add_query_param("city", city)
            .add_query_param("date", &date)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "min_temperature": 3.0, "max_temperature": 9.5 }));
    }
}

