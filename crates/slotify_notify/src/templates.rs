// --- File: crates/slotify_notify/src/templates.rs ---
//! Message templates for booking notifications.
//!
//! Rendering is pure string formatting from a [`BookingDetails`] value; the
//! senders in `email`/`whatsapp` deliver whatever these produce. Times are
//! rendered as the wall-clock values the booking was made with.

use chrono::{DateTime, Utc};

/// The booking facts a notification template needs.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub customer_name: String,
    pub business_name: String,
    pub service_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

fn format_when(details: &BookingDetails) -> String {
    format!(
        "{} from {} to {}",
        details.start_time.format("%A, %d %B %Y"),
        details.start_time.format("%H:%M"),
        details.end_time.format("%H:%M")
    )
}

pub fn confirmation_subject(details: &BookingDetails) -> String {
    format!(
        "Booking confirmed: {} at {}",
        details.service_name, details.business_name
    )
}

pub fn confirmation_email_body(details: &BookingDetails) -> String {
    format!(
        "Hello {},\n\n\
         Your booking for {} at {} is confirmed.\n\n\
         When: {}\n\n\
         We look forward to seeing you!\n\
         {}",
        details.customer_name,
        details.service_name,
        details.business_name,
        format_when(details),
        details.business_name,
    )
}

pub fn confirmation_whatsapp_text(details: &BookingDetails) -> String {
    format!(
        "✅ {}: your {} booking on {} is confirmed.",
        details.business_name,
        details.service_name,
        format_when(details),
    )
}

pub fn cancellation_subject(details: &BookingDetails) -> String {
    format!(
        "Booking cancelled: {} at {}",
        details.service_name, details.business_name
    )
}

pub fn cancellation_email_body(details: &BookingDetails) -> String {
    format!(
        "Hello {},\n\n\
         Your booking for {} at {} on {} has been cancelled.\n\n\
         If this was unexpected, please contact {} directly.\n",
        details.customer_name,
        details.service_name,
        details.business_name,
        format_when(details),
        details.business_name,
    )
}

pub fn cancellation_whatsapp_text(details: &BookingDetails) -> String {
    format!(
        "❌ {}: your {} booking on {} has been cancelled.",
        details.business_name,
        details.service_name,
        format_when(details),
    )
}
