//! SQL implementation of the business repository

use crate::error::DbError;
use crate::repositories::business::{
    BusinessRepository, BusinessSettings, ScheduleDay, ServiceOffering,
};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the business repository
#[derive(Debug, Clone)]
pub struct SqlBusinessRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBusinessRepository {
    /// Create a new SQL business repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_settings(row: &AnyRow) -> Result<BusinessSettings, DbError> {
    Ok(BusinessSettings {
        business_id: row
            .try_get("business_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        name: row.try_get("name").unwrap_or_default(),
        buffer_minutes: row.try_get("buffer_minutes").unwrap_or(0),
        min_advance_minutes: row.try_get("min_advance_minutes").ok(),
    })
}

fn row_to_schedule_day(row: &AnyRow) -> Result<ScheduleDay, DbError> {
    Ok(ScheduleDay {
        business_id: row
            .try_get("business_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        weekday: row
            .try_get("weekday")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        open: row.try_get("open_time").unwrap_or_default(),
        close: row.try_get("close_time").unwrap_or_default(),
        is_open: row.try_get::<i64, _>("is_open").unwrap_or(0) != 0,
    })
}

fn row_to_service(row: &AnyRow) -> Result<ServiceOffering, DbError> {
    Ok(ServiceOffering {
        id: row
            .try_get("id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        business_id: row
            .try_get("business_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        name: row.try_get("name").unwrap_or_default(),
        duration_minutes: row
            .try_get("duration_minutes")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        price_cents: row.try_get("price_cents").unwrap_or(0),
        currency: row.try_get("currency").unwrap_or_default(),
        active: row.try_get::<i64, _>("active").unwrap_or(0) != 0,
    })
}

impl BusinessRepository for SqlBusinessRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing business schema");

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS business_settings (
                    business_id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    buffer_minutes INTEGER NOT NULL DEFAULT 0,
                    min_advance_minutes INTEGER
                )
                "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS schedule_days (
                    business_id TEXT NOT NULL,
                    weekday INTEGER NOT NULL,
                    open_time TEXT NOT NULL,
                    close_time TEXT NOT NULL,
                    is_open INTEGER NOT NULL DEFAULT 0,
                    PRIMARY KEY (business_id, weekday)
                )
                "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS service_offerings (
                    id TEXT PRIMARY KEY,
                    business_id TEXT NOT NULL,
                    name TEXT NOT NULL,
                    duration_minutes INTEGER NOT NULL,
                    price_cents INTEGER NOT NULL DEFAULT 0,
                    currency TEXT NOT NULL DEFAULT 'CHF',
                    active INTEGER NOT NULL DEFAULT 1
                )
                "#,
            )
            .await?;

        info!("Business schema initialized successfully");
        Ok(())
    }

    async fn get_settings(&self, business_id: &str) -> Result<Option<BusinessSettings>, DbError> {
        let row = sqlx::query("SELECT * FROM business_settings WHERE business_id = $1")
            .bind(business_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_settings).transpose()
    }

    async fn upsert_settings(
        &self,
        settings: BusinessSettings,
    ) -> Result<BusinessSettings, DbError> {
        debug!("Upserting settings for business {}", settings.business_id);

        let query = r#"
            INSERT INTO business_settings (business_id, name, buffer_minutes, min_advance_minutes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (business_id) DO UPDATE SET
                name = excluded.name,
                buffer_minutes = excluded.buffer_minutes,
                min_advance_minutes = excluded.min_advance_minutes
        "#;

        sqlx::query(query)
            .bind(&settings.business_id)
            .bind(&settings.name)
            .bind(settings.buffer_minutes)
            .bind(settings.min_advance_minutes)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert business settings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(settings)
    }

    async fn get_schedule(&self, business_id: &str) -> Result<Vec<ScheduleDay>, DbError> {
        let rows = sqlx::query(
            "SELECT * FROM schedule_days WHERE business_id = $1 ORDER BY weekday",
        )
        .bind(business_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_schedule_day).collect()
    }

    async fn upsert_schedule_day(&self, day: ScheduleDay) -> Result<ScheduleDay, DbError> {
        debug!(
            "Upserting schedule day {} for business {}",
            day.weekday, day.business_id
        );

        let query = r#"
            INSERT INTO schedule_days (business_id, weekday, open_time, close_time, is_open)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (business_id, weekday) DO UPDATE SET
                open_time = excluded.open_time,
                close_time = excluded.close_time,
                is_open = excluded.is_open
        "#;

        sqlx::query(query)
            .bind(&day.business_id)
            .bind(day.weekday)
            .bind(&day.open)
            .bind(&day.close)
            .bind(if day.is_open { 1i64 } else { 0i64 })
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert schedule day: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(day)
    }

    async fn list_services(&self, business_id: &str) -> Result<Vec<ServiceOffering>, DbError> {
        let rows = sqlx::query(
            "SELECT * FROM service_offerings WHERE business_id = $1 ORDER BY name",
        )
        .bind(business_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_service).collect()
    }

    async fn find_service(
        &self,
        business_id: &str,
        service_id: &str,
    ) -> Result<Option<ServiceOffering>, DbError> {
        let row = sqlx::query(
            "SELECT * FROM service_offerings WHERE business_id = $1 AND id = $2",
        )
        .bind(business_id)
        .bind(service_id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_service).transpose()
    }

    async fn upsert_service(&self, service: ServiceOffering) -> Result<ServiceOffering, DbError> {
        debug!(
            "Upserting service {} for business {}",
            service.id, service.business_id
        );

        let query = r#"
            INSERT INTO service_offerings (id, business_id, name, duration_minutes, price_cents, currency, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                duration_minutes = excluded.duration_minutes,
                price_cents = excluded.price_cents,
                currency = excluded.currency,
                active = excluded.active
        "#;

        sqlx::query(query)
            .bind(&service.id)
            .bind(&service.business_id)
            .bind(&service.name)
            .bind(service.duration_minutes)
            .bind(service.price_cents)
            .bind(&service.currency)
            .bind(if service.active { 1i64 } else { 0i64 })
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert service offering: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(service)
    }
}
