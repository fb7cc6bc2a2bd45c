// --- File: crates/slotify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via SLOTIFY__DATABASE__URL or DATABASE_URL
}

// --- Booking Config ---
// Server-wide booking defaults. Per-business values (weekly schedule, buffer
// minutes, service durations) live in the database and override these.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    /// Fallback buffer applied around bookings when a business has no setting.
    #[serde(default)]
    pub default_buffer_minutes: i64,
    /// Minimum lead time before a slot may start, in minutes.
    pub min_advance_minutes: Option<i64>,
    /// Shared secret guarding admin booking routes.
    /// Loaded via env var: SLOTIFY__BOOKING__ADMIN_SECRET
    pub admin_secret: Option<String>,
}

// --- Notification Config ---
// Holds non-secret notification config. Secrets loaded directly from env vars.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifyConfig {
    /// Mail API endpoint, e.g. "https://api.sendgrid.com/v3/mail/send"
    pub mail_api_url: String,
    /// Sender address for outbound email.
    pub from_email: String,
    /// Sender display name for outbound email.
    pub from_name: Option<String>,
    /// Twilio account SID for WhatsApp delivery.
    pub twilio_account_sid: String,
    /// WhatsApp-enabled sender number, e.g. "+14155238886".
    pub whatsapp_from: String,
    // Secrets loaded directly from env vars:
    // SLOTIFY_MAIL_API_KEY
    // TWILIO_AUTH_TOKEN
}

// --- Payments Config ---
// Holds non-secret payment-webhook config. Signing secret loaded from env var.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentsConfig {
    /// Provider label recorded on reconciled bookings, e.g. "stripe".
    pub provider: String,
    /// Maximum accepted age of a signed webhook timestamp, in seconds.
    pub timestamp_tolerance_secs: Option<i64>,
    // Signing secret loaded directly from env var: SLOTIFY_WEBHOOK_SECRET
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_booking: bool,
    #[serde(default)]
    pub use_notify: bool,
    #[serde(default)]
    pub use_payments: bool,

    // --- Feature Sections ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
    #[serde(default)]
    pub payments: Option<PaymentsConfig>,
}
