//! Response body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

/// Reachability of one backing component and which implementation is in use.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    /// `postgres`, `redis`, `memory` or `disabled`.
    pub backend: &'static str,
}

impl ComponentHealth {
    pub fn new(backend: &'static str, reachable: bool) -> Self {
        Self {
            status: if reachable {
                ComponentStatus::Ok
            } else {
                ComponentStatus::Error
            },
            backend,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ComponentStatus::Ok
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: ComponentHealth,
    pub cache: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl From<HealthChecks> for HealthResponse {
    fn from(checks: HealthChecks) -> Self {
        let status = if checks.store.is_ok() && checks.cache.is_ok() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unreachable_component_degrades_service() {
        let response = HealthResponse::from(HealthChecks {
            store: ComponentHealth::new("postgres", false),
            cache: ComponentHealth::new("redis", true),
        });

        assert_eq!(response.status, ServiceStatus::Degraded);
        assert_eq!(
            serde_json::to_value(&response.checks).unwrap(),
            json!({
                "store": { "status": "error", "backend": "postgres" },
                "cache": { "status": "ok", "backend": "redis" }
            })
        );
    }
}
