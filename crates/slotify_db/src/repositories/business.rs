//! Repository for business configuration
//!
//! Businesses configure their buffer policy, weekly opening hours, and the
//! services customers can book. These rows are read immediately before each
//! availability computation and never cached process-wide.

use crate::error::DbError;
use serde::{Deserialize, Serialize};

/// Per-business booking policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub business_id: String,
    pub name: String,
    /// Symmetric exclusion margin applied around candidate slots, in minutes.
    pub buffer_minutes: i64,
    /// Minimum lead time before a slot may start, in minutes.
    pub min_advance_minutes: Option<i64>,
}

/// One weekday's opening hours. `weekday` is indexed 0–6 with Sunday = 0.
/// `open`/`close` are wall-clock "HH:mm" strings; validated as `open < close`
/// on write, before they ever reach the availability resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub business_id: String,
    pub weekday: i64,
    pub open: String,
    pub close: String,
    pub is_open: bool,
}

/// A bookable service with its duration and price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub duration_minutes: i64,
    /// Price in the smallest currency unit (e.g. cents).
    pub price_cents: i64,
    pub currency: String,
    pub active: bool,
}

/// Repository for business settings, weekly schedules, and service offerings.
pub trait BusinessRepository: Send + Sync {
    /// Initialize the database schema for business configuration.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Fetch a business's booking policy.
    fn get_settings(
        &self,
        business_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<BusinessSettings>, DbError>> + Send;

    /// Create or update a business's booking policy.
    fn upsert_settings(
        &self,
        settings: BusinessSettings,
    ) -> impl std::future::Future<Output = Result<BusinessSettings, DbError>> + Send;

    /// Fetch a business's weekly schedule rows (at most one per weekday).
    fn get_schedule(
        &self,
        business_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ScheduleDay>, DbError>> + Send;

    /// Create or update the hours for one weekday.
    fn upsert_schedule_day(
        &self,
        day: ScheduleDay,
    ) -> impl std::future::Future<Output = Result<ScheduleDay, DbError>> + Send;

    /// List a business's service offerings.
    fn list_services(
        &self,
        business_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ServiceOffering>, DbError>> + Send;

    /// Find a single service offering.
    fn find_service(
        &self,
        business_id: &str,
        service_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ServiceOffering>, DbError>> + Send;

    /// Create or update a service offering.
    fn upsert_service(
        &self,
        service: ServiceOffering,
    ) -> impl std::future::Future<Output = Result<ServiceOffering, DbError>> + Send;
}
