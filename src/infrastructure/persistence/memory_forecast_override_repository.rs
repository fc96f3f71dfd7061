//! In-memory implementation of the forecast override repository.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewForecastOverride, OverriddenForecast};
use crate::domain::repositories::ForecastOverrideRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    records: BTreeMap<(NaiveDate, String), OverriddenForecast>,
}

/// Process-local override store.
///
/// Used when no database is configured and as a fake in handler tests.
/// Overrides are lost on restart.
#[derive(Default)]
pub struct InMemoryForecastOverrideRepository {
    store: RwLock<Store>,
}

impl InMemoryForecastOverrideRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ForecastOverrideRepository for InMemoryForecastOverrideRepository {
    async fn upsert(
        &self,
        new_override: NewForecastOverride,
    ) -> Result<OverriddenForecast, AppError> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        let key = (new_override.date, new_override.city.clone());

        if let Some(existing) = store.records.get_mut(&key) {
            existing.min_temperature = new_override.min_temperature;
            existing.max_temperature = new_override.max_temperature;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        store.next_id += 1;
        let record = OverriddenForecast::new(
            store.next_id,
            new_override.city,
            new_override.date,
            new_override.min_temperature,
            new_override.max_temperature,
            now,
            now,
        );
        store.records.insert(key, record.clone());

        Ok(record)
    }

    async fn find(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Option<OverriddenForecast>, AppError> {
        let store = self.store.read().await;
        Ok(store.records.get(&(date, city.to_string())).cloned())
    }

    async fn list(&self, city: Option<String>) -> Result<Vec<OverriddenForecast>, AppError> {
        let store = self.store.read().await;
        Ok(store
            .records
            .values()
            .filter(|r| city.as_deref().is_none_or(|c| r.city == c))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
