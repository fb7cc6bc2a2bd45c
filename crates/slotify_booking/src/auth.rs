// --- File: crates/slotify_booking/src/auth.rs ---

use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use constant_time_eq::constant_time_eq; // For secure string comparison
use slotify_config::AppConfig;
use std::sync::Arc;
use tracing::error;

/// The state the admin auth middleware needs: AppConfig for the shared secret.
#[derive(Clone)]
pub struct AdminAuthState {
    pub config: Arc<AppConfig>,
}

const INTERNAL_AUTH_HEADER: &str = "X-Internal-Auth-Secret";

/// Axum middleware guarding admin booking routes.
/// Checks for a shared secret in the `X-Internal-Auth-Secret` header.
pub async fn admin_auth_middleware(
    State(auth_state): State<Arc<AdminAuthState>>,
    req: Request<AxumBody>,
    next: Next,
) -> Response {
    let expected_secret = match auth_state
        .config
        .booking
        .as_ref()
        .and_then(|cfg| cfg.admin_secret.clone())
    {
        Some(secret) => secret,
        None => {
            error!("Booking admin secret not configured in AppConfig");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error for admin auth.".to_string(),
            )
                .into_response();
        }
    };

    let provided_secret = req
        .headers()
        .get(INTERNAL_AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided_secret {
        Some(provided) => {
            if constant_time_eq(provided.as_bytes(), expected_secret.as_bytes()) {
                next.run(req).await
            } else {
                error!("Admin request: invalid secret provided");
                (
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized: Invalid credentials.".to_string(),
                )
                    .into_response()
            }
        }
        None => (
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: Missing {} header.", INTERNAL_AUTH_HEADER),
        )
            .into_response(),
    }
}
