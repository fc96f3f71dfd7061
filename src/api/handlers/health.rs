//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{ComponentHealth, HealthChecks, HealthResponse, ServiceStatus};
use crate::state::AppState;

/// Probes the override store and the cache.
///
/// # Endpoint
///
/// `GET /health`
///
/// Responds `200` when both are reachable and `503` otherwise, with the same body:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "backend": "postgres" },
///     "cache": { "status": "ok", "backend": "redis" }
///   }
/// }
/// ```
///
/// The weather provider is not probed.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (store_ok, cache_ok) = tokio::join!(
        state.weather_service.store_healthy(),
        state.cache.health_check()
    );

    let response = HealthResponse::from(HealthChecks {
        store: ComponentHealth::new(state.weather_service.store_backend(), store_ok),
        cache: ComponentHealth::new(state.cache.backend_name(), cache_ok),
    });

    let code = match response.status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    if code != StatusCode::OK {
        tracing::warn!(
            "Health check degraded: store={:?} cache={:?}",
            response.checks.store.status,
            response.checks.cache.status
        );
    }

    (code, Json(response))
}
