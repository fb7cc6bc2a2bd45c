//! SQL implementation of the booking repository
//!
//! This module provides a SQL implementation of the BookingRepository trait.
//! Times are stored as RFC3339 TEXT because the SQLx `Any` driver does not
//! decode chrono values; rows are mapped by hand.

use crate::error::DbError;
use crate::repositories::booking::{
    Booking, BookingRepository, BookingStatus, NewBooking, PaymentStatus,
};
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingRepository {
    /// Create a new SQL booking repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn parse_rfc3339(value: &str, column: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("{column}: {e}")))
}

fn row_to_booking(row: &AnyRow) -> Result<Booking, DbError> {
    let status: String = row
        .try_get("status")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let payment_status: String = row
        .try_get("payment_status")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let start_time: String = row
        .try_get("start_time")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let end_time: String = row
        .try_get("end_time")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;

    Ok(Booking {
        id: row
            .try_get("id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        business_id: row
            .try_get("business_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        service_id: row
            .try_get("service_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        customer_name: row.try_get("customer_name").unwrap_or_default(),
        customer_email: row.try_get("customer_email").unwrap_or_default(),
        customer_phone: row.try_get("customer_phone").ok(),
        start_time: parse_rfc3339(&start_time, "start_time")?,
        end_time: parse_rfc3339(&end_time, "end_time")?,
        status: BookingStatus::parse(&status)?,
        payment_status: PaymentStatus::parse(&payment_status)?,
        payment_provider: row.try_get("payment_provider").ok(),
        payment_ref: row.try_get("payment_ref").ok(),
        created_at: row
            .try_get::<String, _>("created_at")
            .ok()
            .and_then(|s| parse_rfc3339(&s, "created_at").ok()),
        updated_at: row
            .try_get::<String, _>("updated_at")
            .ok()
            .and_then(|s| parse_rfc3339(&s, "updated_at").ok()),
    })
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                business_id TEXT NOT NULL,
                service_id TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                payment_status TEXT NOT NULL DEFAULT 'unpaid',
                payment_provider TEXT,
                payment_ref TEXT,
                created_at TEXT,
                updated_at TEXT
            )
        "#;

        self.db_client.execute(query).await?;
        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_bookings_business_start
                 ON bookings (business_id, start_time)",
            )
            .await?;

        info!("Booking schema initialized successfully");
        Ok(())
    }

    async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        debug!(
            "Creating booking for business {} at {}",
            booking.business_id, booking.start_time
        );

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let query = r#"
            INSERT INTO bookings (
                id, business_id, service_id, customer_name, customer_email,
                customer_phone, start_time, end_time, status, payment_status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 'unpaid', $9, $9)
        "#;

        sqlx::query(query)
            .bind(&id)
            .bind(&booking.business_id)
            .bind(&booking.service_id)
            .bind(&booking.customer_name)
            .bind(&booking.customer_email)
            .bind(&booking.customer_phone)
            .bind(booking.start_time.to_rfc3339())
            .bind(booking.end_time.to_rfc3339())
            .bind(now.to_rfc3339())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(Booking {
            id,
            business_id: booking.business_id,
            service_id: booking.service_id,
            customer_name: booking.customer_name,
            customer_email: booking.customer_email,
            customer_phone: booking.customer_phone,
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_provider: None,
            payment_ref: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_booking).transpose()
    }

    async fn find_active_between(
        &self,
        business_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DbError> {
        // RFC3339 UTC strings compare lexicographically in time order, so the
        // overlap test can run on the TEXT columns directly.
        let query = r#"
            SELECT * FROM bookings
            WHERE business_id = $1
              AND status IN ('pending', 'confirmed')
              AND start_time < $3
              AND end_time > $2
            ORDER BY start_time
        "#;

        let rows = sqlx::query(query)
            .bind(business_id)
            .bind(from.to_rfc3339())
            .bind(to.to_rfc3339())
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_booking).collect()
    }

    async fn find_between(
        &self,
        business_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Booking>, DbError> {
        let query = if include_cancelled {
            r#"
                SELECT * FROM bookings
                WHERE business_id = $1 AND start_time < $3 AND end_time > $2
                ORDER BY start_time
            "#
        } else {
            r#"
                SELECT * FROM bookings
                WHERE business_id = $1 AND start_time < $3 AND end_time > $2
                  AND status != 'cancelled'
                ORDER BY start_time
            "#
        };

        let rows = sqlx::query(query)
            .bind(business_id)
            .bind(from.to_rfc3339())
            .bind(to.to_rfc3339())
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_booking).collect()
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to update booking status: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_paid(&self, id: &str, provider: &str, payment_ref: &str) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET payment_status = 'paid',
                payment_provider = $1,
                payment_ref = $2,
                status = 'confirmed',
                updated_at = $3
            WHERE id = $4 AND status != 'cancelled'
            "#,
        )
        .bind(provider)
        .bind(payment_ref)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to mark booking paid: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_refunded(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET payment_status = 'refunded', updated_at = $1
            WHERE id = $2 AND payment_status = 'paid'
            "#,
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to mark booking refunded: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}
