// --- File: crates/slotify_payments/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy function used by the macro
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::logic::{PaymentEvent, PaymentEventData, PaymentObject};

#[utoipa::path(
    post,
    path = "/payments/webhook",
    request_body(content = PaymentEvent, example = json!({
        "id": "evt_1a2b3c",
        "type": "checkout.completed",
        "created": 1767225600,
        "data": {
            "object": {
                "id": "pay_9z8y7x",
                "amount": 7500,
                "currency": "CHF",
                "payment_status": "paid",
                "metadata": { "booking_id": "7d8f3b1e-4c6a-4b2f-9d0e-2f1a6c8b5e77" }
            }
        }
    })),
    responses(
        (status = 200, description = "Webhook received and acknowledged"),
        (status = 401, description = "Invalid signature"),
        (status = 404, description = "Webhook referenced an unknown booking")
    ),
    tag = "Payment Webhooks"
)]
fn doc_payment_webhook_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_payment_webhook_handler),
    components(schemas(PaymentEvent, PaymentEventData, PaymentObject)),
    tags(
        (name = "Payment Webhooks", description = "Inbound payment reconciliation")
    )
)]
pub struct PaymentsApiDoc;
