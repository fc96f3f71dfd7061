//! HTTP server initialization and runtime setup.
//!
//! Handles override store and cache setup, provider client construction, and the
//! Axum server lifecycle.

use crate::application::services::WeatherService;
use crate::config::{CacheBackend, CacheConfig, Config, StoreConfig};
use crate::domain::repositories::ForecastOverrideRepository;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    InMemoryForecastOverrideRepository, PgForecastOverrideRepository,
};
use crate::infrastructure::provider::WeatherApiClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Override store (PostgreSQL with migrations, or in-memory)
/// - Cache (Redis, in-memory, or disabled)
/// - WeatherAPI.com client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The provider client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let overrides = build_override_store(&config.store).await?;
    let cache = build_cache(&config.cache).await;

    let provider = WeatherApiClient::new(
        &config.provider.base_url,
        config.provider.api_key.clone(),
        Duration::from_secs(config.provider.timeout_seconds),
    )
    .context("Failed to build weather provider client")?;

    let weather_service = Arc::new(WeatherService::new(
        Arc::new(provider),
        overrides,
        cache.clone(),
        config.cache.ttl_seconds,
    ));

    let state = AppState::new(weather_service, cache);
    let app = app_router(state);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to PostgreSQL and applies migrations, or falls back to the in-memory store.
async fn build_override_store(config: &StoreConfig) -> Result<Arc<dyn ForecastOverrideRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured. Forecast overrides are kept in memory");
        return Ok(Arc::new(InMemoryForecastOverrideRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PgForecastOverrideRepository::new(Arc::new(pool))))
}

/// Builds the configured cache. Redis failures degrade to the in-memory cache.
async fn build_cache(config: &CacheConfig) -> Arc<dyn CacheService> {
    match (config.backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::connect(redis_url, config.ttl_seconds).await {
                Ok(redis) => {
                    tracing::info!("Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
                    Arc::new(MemoryCache::new(config.ttl_seconds))
                }
            }
        }
        (CacheBackend::None, _) => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
        _ => {
            tracing::info!("Cache enabled (in-memory)");
            Arc::new(MemoryCache::new(config.ttl_seconds))
        }
    }
}

/// Waits until either Ctrl+C (SIGINT) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server");
}
