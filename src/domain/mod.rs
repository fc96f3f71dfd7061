//! Domain layer containing business entities and collaborator contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. It defines what the service works with and which external
//! collaborators it needs, leaving concrete implementations to
//! [`crate::infrastructure`].
//!
//! # Architecture
//!
//! - [`entities`] - Forecast overrides and normalized weather payloads
//! - [`repositories`] - Override store contract
//! - [`provider`] - Weather provider contract and its error type
//!
//! # Forecast Lookup Flow
//!
//! 1. Handler validates `city` and `date`
//! 2. [`repositories::ForecastOverrideRepository`] is consulted first
//! 3. The cache is checked (see [`crate::infrastructure::cache`])
//! 4. [`provider::WeatherProvider`] is called on a miss and the result cached

pub mod entities;
pub mod provider;
pub mod repositories;
