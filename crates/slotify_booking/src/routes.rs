// --- File: crates/slotify_booking/src/routes.rs ---

use crate::auth::{admin_auth_middleware, AdminAuthState};
use crate::handlers::{
    book_slot_handler, cancel_booking_handler, get_availability_handler,
    get_business_settings_handler, list_bookings_handler, list_services_handler,
    update_schedule_handler, upsert_business_settings_handler, upsert_service_handler,
    BookingState,
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use slotify_common::services::{BoxedError, NotificationService};
use slotify_config::AppConfig;
use slotify_db::{SqlBookingRepository, SqlBusinessRepository};
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// Admin routes are guarded by the shared-secret middleware; the public
/// availability/booking routes are open (customer identity is a frontend
/// concern at this seam).
pub fn routes(
    config: Arc<AppConfig>,
    bookings: Arc<SqlBookingRepository>,
    businesses: Arc<SqlBusinessRepository>,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let state = Arc::new(BookingState {
        config: config.clone(),
        bookings,
        businesses,
        notifier,
    });
    let auth_state = Arc::new(AdminAuthState { config });

    let public = Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/bookings", post(book_slot_handler))
        .route(
            "/business/{business_id}/services",
            get(list_services_handler),
        )
        .with_state(state.clone());

    let admin = Router::new()
        .route("/admin/bookings", get(list_bookings_handler))
        .route(
            "/admin/bookings/{booking_id}/cancel",
            post(cancel_booking_handler),
        )
        .route(
            "/admin/business/{business_id}/settings",
            get(get_business_settings_handler).put(upsert_business_settings_handler),
        )
        .route(
            "/admin/business/{business_id}/schedule",
            put(update_schedule_handler),
        )
        .route(
            "/admin/business/{business_id}/services",
            post(upsert_service_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            admin_auth_middleware,
        ))
        .with_state(state);

    public.merge(admin)
}
