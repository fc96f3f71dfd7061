//! Domain entity for a manually overridden forecast.

use chrono::{DateTime, NaiveDate, Utc};

use super::weather::ForecastTemperatures;

/// An operator-supplied forecast that takes precedence over the provider.
///
/// At most one record exists per `(city, date)`. The city is stored exactly as
/// submitted and matched case-sensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct OverriddenForecast {
    pub id: i64,
    pub city: String,
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OverriddenForecast {
    /// Creates a new OverriddenForecast instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        city: String,
        date: NaiveDate,
        min_temperature: f64,
        max_temperature: f64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            city,
            date,
            min_temperature,
            max_temperature,
            created_at,
            updated_at,
        }
    }

    /// The override's temperatures in the same shape the provider returns.
    pub fn temperatures(&self) -> ForecastTemperatures {
        ForecastTemperatures {
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
        }
    }
}

/// Input data for creating or replacing an override.
///
/// Not validated on its own; callers check the date window and temperature
/// range before handing it to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewForecastOverride {
    pub city: String,
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
}
