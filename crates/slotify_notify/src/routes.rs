// --- File: crates/slotify_notify/src/routes.rs ---
use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use slotify_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::service::NotifyService;
use slotify_common::services::NotificationService;

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestNotificationRequest {
    /// "email" or "whatsapp"
    pub channel: String,
    pub to: String,
    pub message: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestNotificationResponse {
    pub success: bool,
    pub message: String,
}

/// Handler to send a test notification over a chosen channel.
/// Intended for operators verifying provider credentials.
#[axum::debug_handler]
pub async fn send_test_notification(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<TestNotificationRequest>,
) -> Result<Json<TestNotificationResponse>, (StatusCode, String)> {
    if !config.use_notify {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Notifications disabled".into(),
        ));
    }
    let notify_config = config.notify.as_ref().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "Notification configuration missing".to_string(),
    ))?;

    let service = NotifyService::from_config(notify_config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Notification service unavailable: {}", e),
        )
    })?;

    info!("Sending test notification over {}", request.channel);
    let result = match request.channel.as_str() {
        "email" => {
            service
                .send_email(&request.to, "Slotify test notification", &request.message, false)
                .await
        }
        "whatsapp" => service.send_whatsapp(&request.to, &request.message).await,
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown notification channel: {}", other),
            ))
        }
    };

    match result {
        Ok(outcome) => Ok(Json(TestNotificationResponse {
            success: true,
            message: format!("Notification {} is {}", outcome.id, outcome.status),
        })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Delivery failed: {}", e),
        )),
    }
}

/// Creates a router containing all routes for the notification feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/notify/test", post(send_test_notification))
        .with_state(config)
}
