//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! use validator for field-level checks.

pub mod forecast;
pub mod health;
pub mod weather;
