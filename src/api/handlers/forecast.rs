//! Handlers for forecast lookup and override endpoints.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::forecast::{
    ForecastOverrideRequest, ForecastOverrideResponse, ForecastQuery, ForecastResponse,
};
use crate::domain::entities::NewForecastOverride;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::forecast_validation::{parse_date, today};

/// Returns the min/max temperature forecast for a city and date.
///
/// # Endpoint
///
/// `GET /weather/forecast?city=Paris&date=18.10.2026`
///
/// # Response
///
/// ```json
/// { "min_temperature": 11.1, "max_temperature": 24.5 }
/// ```
///
/// An override for the exact city and date wins over cached or live data.
///
/// # Errors
///
/// Returns 400 if:
/// - `city` or `date` is missing
/// - `date` is not `dd.mm.yyyy`
/// - `date` is in the past or more than 10 days ahead
/// - the provider has no forecast for the city
pub async fn forecast_handler(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, AppError> {
    let (Some(city), Some(raw_date)) = (
        query.city.filter(|c| !c.is_empty()),
        query.date.filter(|d| !d.is_empty()),
    ) else {
        return Err(AppError::missing_parameter(
            "Missing 'city' or 'date' query parameter",
        ));
    };

    let date = parse_date(&raw_date)?;

    let forecast = state
        .weather_service
        .forecast(&city, date, today())
        .await?;

    Ok(Json(forecast.into()))
}

/// Creates or replaces the forecast override for a city and date.
///
/// # Endpoint
///
/// `POST /weather/forecast`
///
/// # Request Body
///
/// ```json
/// {
///   "city": "Paris",
///   "date": "18.10.2026",
///   "min_temperature": 10,
///   "max_temperature": 18
/// }
/// ```
///
/// # Response
///
/// The stored record:
///
/// ```json
/// {
///   "id": 1,
///   "city": "Paris",
///   "date": "18.10.2026",
///   "min_temperature": 10.0,
///   "max_temperature": 18.0
/// }
/// ```
///
/// # Errors
///
/// The city is stored with surrounding whitespace removed.
///
/// Returns 400 if the body is malformed, a field is invalid, `min_temperature`
/// exceeds `max_temperature`, or the date is outside the forecast window.
pub async fn override_forecast_handler(
    State(state): State<AppState>,
    payload: Result<Json<ForecastOverrideRequest>, JsonRejection>,
) -> Result<Json<ForecastOverrideResponse>, AppError> {
    let Json(mut payload) = payload?;
    payload.city = payload.city.trim().to_string();
    payload.validate()?;

    let date = parse_date(&payload.date)?;

    let record = state
        .weather_service
        .override_forecast(
            NewForecastOverride {
                city: payload.city,
                date,
                min_temperature: payload.min_temperature,
                max_temperature: payload.max_temperature,
            },
            today(),
        )
        .await?;

    Ok(Json(record.into()))
}
