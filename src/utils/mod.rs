//! Utility functions shared by handlers, services, and the admin CLI.
//!
//! - [`forecast_validation`] - Date parsing and forecast window / temperature checks

pub mod forecast_validation;
