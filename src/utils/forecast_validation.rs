//! Validation rules shared by the forecast read path and the override write path.
//!
//! Dates travel over the wire as `dd.mm.yyyy`. A forecast date is accepted when it
//! falls inside `[today, today + MAX_DAYS_AHEAD]`, where `today` is the server's
//! local calendar date.

use chrono::{Days, Local, NaiveDate};
use thiserror::Error;

use crate::error::AppError;

/// Wire format for forecast dates (`dd.mm.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// How far into the future a forecast date may be.
pub const MAX_DAYS_AHEAD: u64 = 10;

/// A syntactically valid date outside the accepted forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Date cannot be in the past")]
    InPast,

    #[error("Date cannot be more than 10 days in the future")]
    TooFarAhead,
}

/// Parses a `dd.mm.yyyy` date.
///
/// # Errors
///
/// Returns [`AppError::InvalidDateFormat`] if the string is not a valid calendar
/// date in that format.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat)
}

/// Formats a date back into `dd.mm.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The server's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Checks that `date` lies within `[today, today + MAX_DAYS_AHEAD]`.
pub fn check_date_window(date: NaiveDate, today: NaiveDate) -> Result<(), DateRangeError> {
    if date < today {
        return Err(DateRangeError::InPast);
    }

    match today.checked_add_days(Days::new(MAX_DAYS_AHEAD)) {
        Some(latest) if date > latest => Err(DateRangeError::TooFarAhead),
        _ => Ok(()),
    }
}

/// Checks that `min_temperature <= max_temperature`.
///
/// # Errors
///
/// Returns [`AppError::TemperatureRangeInvalid`] when the minimum exceeds the
/// maximum or either value is not comparable (NaN).
pub fn check_temperature_range(min_temperature: f64, max_temperature: f64) -> Result<(), AppError> {
    if min_temperature <= max_temperature {
        Ok(())
    } else {
        Err(AppError::TemperatureRangeInvalid)
    }
}
