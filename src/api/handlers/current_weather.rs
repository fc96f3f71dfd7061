//! Handler for the current weather endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::weather::{CurrentWeatherQuery, CurrentWeatherResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current temperature and local time for a city.
///
/// # Endpoint
///
/// `GET /weather/current?city=London`
///
/// # Response
///
/// ```json
/// { "temperature": 22.1, "local_time": "16:45" }
/// ```
///
/// Repeated lookups for the same city (case-insensitive) are served from cache
/// until the entry expires.
///
/// # Errors
///
/// Returns 400 if `city` is missing or empty.
/// Returns 404 if the provider does not know the city or fails.
pub async fn current_weather_handler(
    State(state): State<AppState>,
    Query(query): Query<CurrentWeatherQuery>,
) -> Result<Json<CurrentWeatherResponse>, AppError> {
    let city = query
        .city
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::missing_parameter("Missing 'city' query parameter"))?;

    let weather = state
        .weather_service
        .current_weather(&city)
        .await
        .map_err(AppError::provider_as_not_found)?;

    Ok(Json(weather.into()))
}
