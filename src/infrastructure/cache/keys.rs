//! Cache key construction.
//!
//! City names are lowercased so `Paris` and `paris` share one entry. Dates are
//! always rendered as `dd.mm.yyyy`.

use chrono::NaiveDate;

use crate::utils::forecast_validation::format_date;

/// Key for the current weather of `city`.
pub fn current_weather(city: &str) -> String {
    format!("current_weather_{}", city.to_lowercase())
}

/// Key for the forecast of `city` on `date`.
pub fn forecast(city: &str, date: NaiveDate) -> String {
    format!("forecast_{}_{}", city.to_lowercase(), format_date(date))
}
