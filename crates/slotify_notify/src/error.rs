// --- File: crates/slotify_notify/src/error.rs ---
use slotify_common::{external_service_error, HttpStatusCode, SlotifyError};
use thiserror::Error;

/// Notification-specific error types.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error occurred during a delivery API request
    #[error("Notification API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the delivery provider
    #[error("Notification provider returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete notification configuration
    #[error("Notification configuration missing or incomplete")]
    ConfigError,

    /// Error parsing a provider response
    #[error("Failed to parse notification provider response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Internal processing error
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Convert NotifyError to SlotifyError
impl From<NotifyError> for SlotifyError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::RequestError(e) => {
                SlotifyError::HttpError(format!("Notification request error: {}", e))
            }
            NotifyError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Notification provider",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            NotifyError::ConfigError => SlotifyError::ConfigError(
                "Notification configuration missing or incomplete".to_string(),
            ),
            NotifyError::ParseError(e) => {
                SlotifyError::ParseError(format!("Notification response parse error: {}", e))
            }
            NotifyError::InternalError(msg) => {
                SlotifyError::InternalError(format!("Notification internal error: {}", msg))
            }
        }
    }
}

/// Implement HttpStatusCode for NotifyError to provide a consistent way to
/// convert NotifyError to HTTP status codes.
impl HttpStatusCode for NotifyError {
    fn status_code(&self) -> u16 {
        match self {
            NotifyError::RequestError(_) => 500,
            NotifyError::ApiError { status_code, .. } => *status_code,
            NotifyError::ConfigError => 500,
            NotifyError::ParseError(_) => 502,
            NotifyError::InternalError(_) => 500,
        }
    }
}
