// --- File: crates/slotify_payments/src/logic.rs ---
//! Webhook signature verification and payment reconciliation.
//!
//! The provider signs each delivery with an HMAC-SHA256 over
//! `"{timestamp}.{raw body}"` and sends the result in a
//! `Webhook-Signature: t=<unix>,v1=<hex>[,v1=<hex>...]` header. Verification
//! checks every `v1` candidate in constant time and enforces a timestamp
//! tolerance against replays. Processing is limited to field updates on the
//! referenced booking row; no outbound provider calls happen here.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use slotify_db::BookingRepository;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::error::PaymentsError;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "Webhook-Signature";

/// Default maximum accepted age of a signed timestamp.
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 600; // 10 minutes

// --- Data Structures ---

/// Represents the `data` field within a provider event.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentEventData {
    /// The actual object related to the event. serde_json::Value because the
    /// structure of 'object' varies by event type.
    pub object: serde_json::Value,
}

/// Represents the outer provider event object.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentEvent {
    pub id: String,
    pub created: i64, // Unix timestamp
    #[serde(rename = "type")]
    pub event_type: String, // e.g., "checkout.completed"
    pub data: PaymentEventData,
}

/// Specific structure for `data.object` on checkout/refund events.
/// Only the fields reconciliation cares about.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentObject {
    pub id: String,                // Provider-side payment reference
    pub amount: Option<i64>,       // Amount in the smallest currency unit
    pub currency: Option<String>,
    pub payment_status: Option<String>, // e.g., "paid", "unpaid"
    pub metadata: Option<HashMap<String, String>>, // Carries our booking_id
}

impl PaymentObject {
    fn booking_id(&self) -> Result<&str, PaymentsError> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("booking_id"))
            .map(String::as_str)
            .ok_or(PaymentsError::MissingBookingReference)
    }
}

// --- Signature Verification ---

/// Verifies the signature of an incoming payment webhook request.
///
/// # Arguments
/// * `payload_bytes` - The raw request body bytes.
/// * `sig_header` - The value of the signature header.
/// * `secret` - The webhook signing secret shared with the provider.
/// * `tolerance_secs` - Maximum accepted age of the signed timestamp.
///
/// Returns Ok(()) if any `v1` signature matches, otherwise
/// PaymentsError::WebhookSignatureError.
pub fn verify_webhook_signature(
    payload_bytes: &[u8],
    sig_header: Option<&str>,
    secret: &str,
    tolerance_secs: i64,
) -> Result<(), PaymentsError> {
    let sig_header_value = sig_header.ok_or_else(|| {
        PaymentsError::WebhookSignatureError(format!("Missing {} header", SIGNATURE_HEADER))
    })?;

    let mut timestamp_str: Option<&str> = None;
    let mut v1_signatures_hex: Vec<&str> = Vec::new();

    for item in sig_header_value.split(',') {
        let parts: Vec<&str> = item.trim().splitn(2, '=').collect();
        if parts.len() == 2 {
            match parts[0] {
                "t" => timestamp_str = Some(parts[1]),
                "v1" => v1_signatures_hex.push(parts[1]),
                _ => {} // Ignore other scheme versions
            }
        }
    }

    let timestamp_str = timestamp_str.ok_or_else(|| {
        PaymentsError::WebhookSignatureError("Missing timestamp 't' in signature header".to_string())
    })?;
    let parsed_timestamp = timestamp_str.parse::<i64>().map_err(|_| {
        PaymentsError::WebhookSignatureError("Invalid timestamp format in signature header".to_string())
    })?;

    if v1_signatures_hex.is_empty() {
        return Err(PaymentsError::WebhookSignatureError(
            "Missing v1 signature in signature header".to_string(),
        ));
    }

    let current_timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| PaymentsError::WebhookSignatureError(e.to_string()))?
        .as_secs() as i64;
    if (current_timestamp - parsed_timestamp).abs() > tolerance_secs {
        return Err(PaymentsError::WebhookSignatureError(format!(
            "Timestamp outside tolerance of {}s",
            tolerance_secs
        )));
    }

    // Construct the signed payload string from the original header timestamp
    let signed_payload_string = format!(
        "{}.{}",
        timestamp_str,
        String::from_utf8_lossy(payload_bytes)
    );

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        PaymentsError::WebhookSignatureError("Invalid webhook secret format for HMAC".to_string())
    })?;
    mac.update(signed_payload_string.as_bytes());
    let expected_signature_bytes = mac.finalize().into_bytes();
    let calculated_signature_hex = hex::encode(expected_signature_bytes);

    // Check every provided v1 signature for a match
    for provided_sig_hex in v1_signatures_hex {
        if constant_time_eq(
            calculated_signature_hex.as_bytes(),
            provided_sig_hex.as_bytes(),
        ) {
            return Ok(());
        }
    }

    warn!("Webhook signature mismatch for payload of {} bytes", payload_bytes.len());
    Err(PaymentsError::WebhookSignatureError(
        "Signature mismatch".to_string(),
    ))
}

/// Helper for constant-time string comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Computes the signature header value for a payload. Used by tests and by
/// operators replaying deliveries against a local instance.
pub fn sign_payload(payload_bytes: &[u8], secret: &str, timestamp: i64) -> String {
    type HmacSha256 = Hmac<Sha256>;
    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload_bytes));
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(signed_payload.as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

// --- Webhook Processing Logic ---

/// Processes a verified payment webhook event: field updates on the
/// referenced booking row, nothing more. Repeated deliveries of the same
/// event settle on the same row state.
pub async fn process_payment_webhook<R: BookingRepository>(
    event: PaymentEvent,
    provider: &str,
    repo: &R,
) -> Result<(), PaymentsError> {
    info!("Processing payment event {} of type {}", event.id, event.event_type);

    match event.event_type.as_str() {
        "checkout.completed" => {
            let object: PaymentObject = serde_json::from_value(event.data.object).map_err(|e| {
                PaymentsError::WebhookProcessingError(format!(
                    "Failed to parse checkout object: {}",
                    e
                ))
            })?;

            if object.payment_status.as_deref() == Some("paid") {
                let booking_id = object.booking_id()?;
                let updated = repo.mark_paid(booking_id, provider, &object.id).await?;
                if !updated {
                    return Err(PaymentsError::UnknownBooking(booking_id.to_string()));
                }
                info!(
                    "Payment {} reconciled: booking {} confirmed as paid",
                    object.id, booking_id
                );
            } else {
                info!(
                    "Checkout {} completed with payment status {:?}; no action taken",
                    object.id, object.payment_status
                );
            }
        }
        "payment.failed" => {
            let payment_id: Option<&str> = event.data.object.get("id").and_then(|v| v.as_str());
            info!("Payment failed: {:?}; booking left unpaid", payment_id);
        }
        "refund.completed" => {
            let object: PaymentObject = serde_json::from_value(event.data.object).map_err(|e| {
                PaymentsError::WebhookProcessingError(format!("Failed to parse refund object: {}", e))
            })?;

            let booking_id = object.booking_id()?;
            let updated = repo.mark_refunded(booking_id).await?;
            if !updated {
                return Err(PaymentsError::UnknownBooking(booking_id.to_string()));
            }
            info!("Refund {} recorded for booking {}", object.id, booking_id);
        }
        other => {
            info!("Received unhandled payment event type: {}", other);
        }
    }
    Ok(())
}
