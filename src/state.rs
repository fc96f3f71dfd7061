//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::WeatherService;
use crate::infrastructure::cache::CacheService;

/// Handler state.
///
/// The service owns the provider, override store and cache handles; the cache is
/// also exposed directly for health reporting.
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(weather_service: Arc<WeatherService>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            weather_service,
            cache,
        }
    }
}
