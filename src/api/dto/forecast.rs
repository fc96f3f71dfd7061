//! DTOs for forecast lookup and override endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{ForecastTemperatures, OverriddenForecast};
use crate::utils::forecast_validation::format_date;

/// Shape check for `dd.mm.yyyy`; calendar validity is checked when parsing.
static DATE_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").expect("date shape regex is valid")
});

/// Query parameters for `GET /weather/forecast`.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: Option<String>,
    /// `dd.mm.yyyy`
    pub date: Option<String>,
}

/// Forecast min/max temperatures in °C.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub min_temperature: f64,
    pub max_temperature: f64,
}

impl From<ForecastTemperatures> for ForecastResponse {
    fn from(t: ForecastTemperatures) -> Self {
        Self {
            min_temperature: t.min_temperature,
            max_temperature: t.max_temperature,
        }
    }
}

/// Body of `POST /weather/forecast`.
#[derive(Debug, Deserialize, Validate)]
pub struct ForecastOverrideRequest {
    /// City name, stored with its original casing.
    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    pub city: String,

    /// Forecast date in `dd.mm.yyyy`.
    #[validate(regex(path = *DATE_SHAPE_REGEX, message = "Date has wrong format. Use dd.MM.yyyy"))]
    pub date: String,

    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// Stored override echoed back to the caller.
#[derive(Debug, Serialize)]
pub struct ForecastOverrideResponse {
    pub id: i64,
    pub city: String,
    /// `dd.mm.yyyy`
    pub date: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

impl From<OverriddenForecast> for ForecastOverrideResponse {
    fn from(o: OverriddenForecast) -> Self {
        Self {
            id: o.id,
            city: o.city,
            date: format_date(o.date),
            min_temperature: o.min_temperature,
            max_temperature: o.max_temperature,
        }
    }
}
