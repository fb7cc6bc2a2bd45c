//! Database integration for Slotify
//!
//! This crate provides a database client that is designed to be database agnostic,
//! using SQLx as the underlying database library. It supports SQLite, PostgreSQL,
//! and MySQL databases through feature flags, and exposes the repositories the
//! booking flow depends on: bookings and business configuration.
//!
//! Timestamps are stored as RFC3339 TEXT columns: the SQLx `Any` driver does
//! not decode chrono types, so rows are mapped by hand and parsed at the
//! repository boundary.

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

// Re-export the client and factory for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;

// Re-export the repositories module components for ease of use
pub use repositories::{
    Booking, BookingRepository, BookingStatus, BusinessRepository, BusinessSettings, NewBooking,
    PaymentStatus, ScheduleDay, ServiceOffering, SqlBookingRepository, SqlBusinessRepository,
};
