// --- File: crates/slotify_payments/src/error.rs ---
use slotify_common::{HttpStatusCode, SlotifyError};
use thiserror::Error;

/// Payment-webhook-specific error types.
#[derive(Error, Debug)]
pub enum PaymentsError {
    /// Webhook signature verification failed
    #[error("Webhook signature verification failed: {0}")]
    WebhookSignatureError(String),

    /// Webhook event processing error
    #[error("Webhook event processing error: {0}")]
    WebhookProcessingError(String),

    /// Error parsing a webhook payload
    #[error("Failed to parse webhook payload: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing booking reference in webhook metadata
    #[error("Missing booking_id in webhook metadata")]
    MissingBookingReference,

    /// The referenced booking does not exist
    #[error("No booking found for webhook reference: {0}")]
    UnknownBooking(String),

    /// Missing or incomplete payments configuration
    #[error("Payments configuration missing or incomplete")]
    ConfigError,

    /// Database error while reconciling payment fields
    #[error("Database error: {0}")]
    Database(#[from] slotify_db::DbError),
}

/// Convert PaymentsError to SlotifyError
impl From<PaymentsError> for SlotifyError {
    fn from(err: PaymentsError) -> Self {
        match err {
            PaymentsError::WebhookSignatureError(msg) => {
                SlotifyError::AuthError(format!("Webhook signature error: {}", msg))
            }
            PaymentsError::WebhookProcessingError(msg) => SlotifyError::InternalError(msg),
            PaymentsError::ParseError(e) => {
                SlotifyError::ParseError(format!("Webhook payload parse error: {}", e))
            }
            PaymentsError::MissingBookingReference => {
                SlotifyError::ValidationError("Missing booking_id in webhook metadata".to_string())
            }
            PaymentsError::UnknownBooking(id) => {
                SlotifyError::NotFoundError(format!("No booking found for webhook reference: {}", id))
            }
            PaymentsError::ConfigError => SlotifyError::ConfigError(
                "Payments configuration missing or incomplete".to_string(),
            ),
            PaymentsError::Database(e) => SlotifyError::DatabaseError(e.to_string()),
        }
    }
}

/// Implement HttpStatusCode for PaymentsError to provide a consistent way to
/// convert PaymentsError to HTTP status codes.
impl HttpStatusCode for PaymentsError {
    fn status_code(&self) -> u16 {
        match self {
            PaymentsError::WebhookSignatureError(_) => 401,
            PaymentsError::WebhookProcessingError(_) => 500,
            PaymentsError::ParseError(_) => 400,
            PaymentsError::MissingBookingReference => 400,
            PaymentsError::UnknownBooking(_) => 404,
            PaymentsError::ConfigError => 500,
            PaymentsError::Database(_) => 500,
        }
    }
}
