//! API route configuration.

use crate::api::handlers::{current_weather_handler, forecast_handler, override_forecast_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Weather routes. No authentication is applied.
///
/// # Endpoints
///
/// - `GET  /weather/current`   - Current temperature and local time for a city
/// - `GET  /weather/forecast`  - Min/max forecast for a city and date
/// - `POST /weather/forecast`  - Create or replace a forecast override
pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather/current", get(current_weather_handler))
        .route(
            "/weather/forecast",
            get(forecast_handler).post(override_forecast_handler),
        )
}
