//! Repository for bookings
//!
//! This module defines the booking row model and the repository trait the
//! booking and payment flows depend on. The trait keeps the rest of the
//! workspace agnostic of the specific database backend.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DbError> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(DbError::DecodeError(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

/// Payment reconciliation state of a booking, updated by provider webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DbError> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(DbError::DecodeError(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}

/// A persisted booking row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub business_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_provider: Option<String>,
    pub payment_ref: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields supplied by the booking-creation flow; the repository assigns the
/// id and timestamps and starts the row as pending/unpaid.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub business_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Repository for bookings
///
/// This trait defines the interface for storing and retrieving bookings.
pub trait BookingRepository: Send + Sync {
    /// Initialize the database schema
    ///
    /// Creates the bookings table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a new booking, returned with its assigned id.
    fn create(
        &self,
        booking: NewBooking,
    ) -> impl std::future::Future<Output = Result<Booking, DbError>> + Send;

    /// Find a booking by id.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Find the bookings that occupy time for availability purposes:
    /// pending and confirmed rows for the business overlapping `[from, to)`.
    /// Cancelled bookings are excluded here, so callers can feed the result
    /// to the availability resolver without further status filtering.
    fn find_active_between(
        &self,
        business_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// List bookings for a business in a time range, optionally including
    /// cancelled rows. Used by the admin listing endpoint.
    fn find_between(
        &self,
        business_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Update the lifecycle status of a booking.
    ///
    /// # Returns
    ///
    /// `true` if a row was updated, `false` if the booking was not found
    fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Record a successful payment: sets the payment fields and confirms the
    /// booking. Idempotent with respect to repeated webhook deliveries.
    fn mark_paid(
        &self,
        id: &str,
        provider: &str,
        payment_ref: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Record a refund against a previously paid booking.
    fn mark_refunded(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
