//! PostgreSQL implementation of the forecast override repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewForecastOverride, OverriddenForecast};
use crate::domain::repositories::ForecastOverrideRepository;
use crate::error::AppError;

/// PostgreSQL repository for forecast overrides.
///
/// Uniqueness of `(city, date)` is enforced by the `overridden_forecasts_city_date_key`
/// constraint; writes use `INSERT ... ON CONFLICT DO UPDATE`, so concurrent writers
/// for the same key resolve as last-write-wins.
pub struct PgForecastOverrideRepository {
    pool: Arc<PgPool>,
}

impl PgForecastOverrideRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OverrideRow {
    id: i64,
    city: String,
    date: NaiveDate,
    min_temperature: f64,
    max_temperature: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OverrideRow> for OverriddenForecast {
    fn from(r: OverrideRow) -> Self {
        OverriddenForecast::new(
            r.id,
            r.city,
            r.date,
            r.min_temperature,
            r.max_temperature,
            r.created_at,
            r.updated_at,
        )
    }
}

#[async_trait]
impl ForecastOverrideRepository for PgForecastOverrideRepository {
    async fn upsert(
        &self,
        new_override: NewForecastOverride,
    ) -> Result<OverriddenForecast, AppError> {
        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            INSERT INTO overridden_forecasts (city, date, min_temperature, max_temperature)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (city, date) DO UPDATE SET
                min_temperature = EXCLUDED.min_temperature,
                max_temperature = EXCLUDED.max_temperature,
                updated_at      = NOW()
            RETURNING id, city, date, min_temperature, max_temperature, created_at, updated_at
            "#,
        )
        .bind(&new_override.city)
        .bind(new_override.date)
        .bind(new_override.min_temperature)
        .bind(new_override.max_temperature)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Option<OverriddenForecast>, AppError> {
        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT id, city, date, min_temperature, max_temperature, created_at, updated_at
            FROM overridden_forecasts
            WHERE city = $1 AND date = $2
            "#,
        )
        .bind(city)
        .bind(date)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, city: Option<String>) -> Result<Vec<OverriddenForecast>, AppError> {
        let rows = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT id, city, date, min_temperature, max_temperature, created_at, updated_at
            FROM overridden_forecasts
            WHERE ($1::TEXT IS NULL OR city = $1)
            ORDER BY date, city
            "#,
        )
        .bind(city)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
