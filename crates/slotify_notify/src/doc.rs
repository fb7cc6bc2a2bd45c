// --- File: crates/slotify_notify/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy functions used by the macros
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::routes::{TestNotificationRequest, TestNotificationResponse};

#[utoipa::path(
    post,
    path = "/notify/test",
    request_body = TestNotificationRequest,
    responses(
        (status = 200, description = "Test notification sent", body = TestNotificationResponse),
        (status = 400, description = "Unknown notification channel"),
        (status = 503, description = "Notifications disabled by configuration")
    ),
    tag = "Notify"
)]
fn doc_send_test_notification() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_send_test_notification),
    components(schemas(TestNotificationRequest, TestNotificationResponse)),
    tags(
        (name = "Notify", description = "Outbound notification API")
    )
)]
pub struct NotifyApiDoc;
