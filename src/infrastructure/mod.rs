//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, caching, and the weather provider.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis, in-memory, and no-op implementations)
//! - [`persistence`] - Override store implementations (PostgreSQL and in-memory)
//! - [`provider`] - WeatherAPI.com HTTP client

pub mod cache;
pub mod persistence;
pub mod provider;
