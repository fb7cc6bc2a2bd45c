// --- File: crates/slotify_payments/src/routes.rs ---
use axum::{routing::post, Router};
use slotify_config::AppConfig;
use slotify_db::SqlBookingRepository;
use std::sync::Arc;

use crate::handlers::{payment_webhook_handler, PaymentsState};

/// Creates a router containing all routes for the payments feature.
pub fn routes(config: Arc<AppConfig>, bookings: Arc<SqlBookingRepository>) -> Router {
    let state = Arc::new(PaymentsState { config, bookings });

    Router::new()
        .route("/payments/webhook", post(payment_webhook_handler))
        .with_state(state)
}
