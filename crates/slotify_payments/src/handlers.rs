// --- File: crates/slotify_payments/src/handlers.rs ---
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use slotify_config::AppConfig;
use slotify_db::SqlBookingRepository;
use std::sync::Arc;
use tracing::{error, info};

use crate::logic::{
    process_payment_webhook, verify_webhook_signature, PaymentEvent, DEFAULT_TOLERANCE_SECONDS,
    SIGNATURE_HEADER,
};
use crate::PaymentsError;

// --- State for payment handlers ---
#[derive(Clone)]
pub struct PaymentsState {
    pub config: Arc<AppConfig>,
    pub bookings: Arc<SqlBookingRepository>,
}

/// Axum handler for incoming payment-provider webhooks.
///
/// Takes the raw body so the signature is verified over exactly the bytes
/// the provider signed. Always acknowledges verified deliveries with 200 so
/// the provider stops retrying; reconciliation failures for unknown bookings
/// are reported as errors.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/payments/webhook", // Path relative to /api
    responses(
        (status = 200, description = "Webhook received and acknowledged"),
        (status = 400, description = "Bad request (e.g., bad payload)"),
        (status = 401, description = "Invalid signature"),
        (status = 500, description = "Internal error processing webhook")
    ),
    tag = "Payment Webhooks"
))]
pub async fn payment_webhook_handler(
    State(state): State<Arc<PaymentsState>>,
    headers: HeaderMap,
    body: String, // Raw body for signature verification
) -> Response {
    if !state.config.use_payments {
        return (StatusCode::SERVICE_UNAVAILABLE, "Payments disabled.").into_response();
    }

    let payments_config = match state.config.payments.as_ref() {
        Some(cfg) => cfg,
        None => {
            error!("Payments configuration missing in AppConfig");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Webhook signing secret comes from the environment, never config files
    let webhook_secret = match std::env::var("SLOTIFY_WEBHOOK_SECRET") {
        Ok(s) => s,
        Err(_) => {
            error!("SLOTIFY_WEBHOOK_SECRET environment variable not set");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let sig_header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());
    let tolerance = payments_config
        .timestamp_tolerance_secs
        .unwrap_or(DEFAULT_TOLERANCE_SECONDS);

    if let Err(e) = verify_webhook_signature(body.as_bytes(), sig_header, &webhook_secret, tolerance)
    {
        info!("Rejected webhook: {}", e);
        return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
    }

    let event: PaymentEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            info!("Rejected webhook with malformed payload: {}", e);
            return (StatusCode::BAD_REQUEST, format!("Malformed payload: {}", e))
                .into_response();
        }
    };

    match process_payment_webhook(event, &payments_config.provider, state.bookings.as_ref()).await
    {
        Ok(()) => (StatusCode::OK, "Webhook processed.").into_response(),
        Err(e @ PaymentsError::UnknownBooking(_)) => {
            error!("Webhook referenced unknown booking: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Webhook processing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
