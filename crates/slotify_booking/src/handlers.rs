// File: crates/slotify_booking/src/handlers.rs
use crate::logic::{
    available_slots, AdminBookingsQuery, AvailabilityQuery, AvailableSlot, AvailableSlotsResponse,
    BookSlotRequest, BookedInterval, BookingListResponse, BookingResponse, CancelBookingRequest,
    CancellationResponse, WeeklySchedule,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use slotify_common::services::{BoxedError, NotificationService};
use slotify_config::AppConfig;
use slotify_db::{
    BookingRepository, BookingStatus, BusinessRepository, BusinessSettings, NewBooking,
    ScheduleDay, ServiceOffering, SqlBookingRepository, SqlBusinessRepository,
};
use slotify_notify::templates::{
    cancellation_email_body, cancellation_subject, cancellation_whatsapp_text,
    confirmation_email_body, confirmation_subject, confirmation_whatsapp_text, BookingDetails,
};
use std::sync::Arc;
use tracing::{error, info};

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub bookings: Arc<SqlBookingRepository>,
    pub businesses: Arc<SqlBusinessRepository>,
    /// Outbound confirmation/cancellation channel; absent when notifications
    /// are disabled. Sends are best-effort and never fail a request.
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, (StatusCode, String)> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} format (YYYY-MM-DD)", field),
        )
    })
}

/// UTC day bounds `[midnight, next midnight)` for a target date.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    (start, start + Duration::days(1))
}

fn internal_error(context: &str, err: impl std::fmt::Display) -> (StatusCode, String) {
    error!("{}: {}", context, err);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
}

/// Loads the per-business inputs an availability computation needs:
/// buffer policy and weekly schedule. Missing settings fall back to the
/// server-wide booking defaults.
async fn load_business_context(
    state: &BookingState,
    business_id: &str,
) -> Result<(i64, WeeklySchedule), (StatusCode, String)> {
    let settings = state
        .businesses
        .get_settings(business_id)
        .await
        .map_err(|e| internal_error("Failed to load business settings", e))?;

    let buffer_minutes = settings.map(|s| s.buffer_minutes).unwrap_or_else(|| {
        state
            .config
            .booking
            .as_ref()
            .map(|b| b.default_buffer_minutes)
            .unwrap_or(0)
    });

    let rows = state
        .businesses
        .get_schedule(business_id)
        .await
        .map_err(|e| internal_error("Failed to load weekly schedule", e))?;

    Ok((buffer_minutes, WeeklySchedule::from_rows(&rows)))
}

/// Computes the currently bookable start instants for one business/service/date
/// from a fresh snapshot of pending and confirmed bookings.
async fn compute_available_slots(
    state: &BookingState,
    business_id: &str,
    service: &ServiceOffering,
    date: NaiveDate,
) -> Result<Vec<DateTime<Utc>>, (StatusCode, String)> {
    let (buffer_minutes, schedule) = load_business_context(state, business_id).await?;

    let (from, to) = day_bounds(date);
    let existing: Vec<BookedInterval> = state
        .bookings
        .find_active_between(business_id, from, to)
        .await
        .map_err(|e| internal_error("Failed to load bookings", e))?
        .iter()
        .map(BookedInterval::from)
        .collect();

    available_slots(
        &schedule,
        date,
        service.duration_minutes,
        &existing,
        buffer_minutes,
    )
    .map_err(|e| {
        error!("Slot computation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

/// Handler to get available time slots.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability", // Path relative to /api
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available time slots", body = AvailableSlotsResponse),
        (status = 400, description = "Bad request (e.g., invalid date format)"),
        (status = 404, description = "Unknown service"),
        (status = 500, description = "Internal error")
    ),
    tag = "Booking"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, (StatusCode, String)> {
    // Ensure booking feature is enabled via runtime config
    if !state.config.use_booking {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Booking service is disabled.".to_string(),
        ));
    }

    let date = parse_date(&query.date, "date")?;

    let service = state
        .businesses
        .find_service(&query.business_id, &query.service_id)
        .await
        .map_err(|e| internal_error("Failed to load service", e))?
        .filter(|s| s.active)
        .ok_or_else(|| {
            let err_msg = format!("No service offered with id {}.", query.service_id);
            info!("{}", err_msg);
            (StatusCode::NOT_FOUND, err_msg)
        })?;

    let mut slots = compute_available_slots(&state, &query.business_id, &service, date).await?;

    // Don't offer slots starting before now + the configured lead time.
    let min_advance = state
        .config
        .booking
        .as_ref()
        .and_then(|b| b.min_advance_minutes)
        .unwrap_or(0);
    let earliest = Utc::now() + Duration::minutes(min_advance);
    slots.retain(|slot| *slot >= earliest);

    let duration = Duration::minutes(service.duration_minutes);
    let slots = slots
        .into_iter()
        .map(|start| AvailableSlot {
            start_time: start.to_rfc3339(),
            end_time: (start + duration).to_rfc3339(),
            duration_minutes: service.duration_minutes,
        })
        .collect();

    Ok(Json(AvailableSlotsResponse { slots }))
}

/// Handler to book a slot.
///
/// Re-validates the requested start against a fresh snapshot of bookings
/// before inserting; the availability endpoint's output is advisory only.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = BookSlotRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Bad request"),
        (status = 409, description = "Requested slot is no longer available"),
        (status = 500, description = "Internal error")
    ),
    tag = "Booking"
))]
pub async fn book_slot_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    if !state.config.use_booking {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Booking service is disabled.".to_string(),
        ));
    }

    let start_time = DateTime::parse_from_rfc3339(&payload.start_time)
        .map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                "Invalid start_time format (RFC 3339)".to_string(),
            )
        })?
        .with_timezone(&Utc);

    let service = state
        .businesses
        .find_service(&payload.business_id, &payload.service_id)
        .await
        .map_err(|e| internal_error("Failed to load service", e))?
        .filter(|s| s.active)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("No service offered with id {}.", payload.service_id),
            )
        })?;

    let date = start_time.date_naive();
    let slots = compute_available_slots(&state, &payload.business_id, &service, date).await?;

    if !slots.contains(&start_time) {
        info!(
            "Booking conflict for business {} at {}",
            payload.business_id, start_time
        );
        return Err((
            StatusCode::CONFLICT,
            "Requested time slot is no longer available.".to_string(),
        ));
    }

    let end_time = start_time + Duration::minutes(service.duration_minutes);
    let booking = state
        .bookings
        .create(NewBooking {
            business_id: payload.business_id.clone(),
            service_id: payload.service_id.clone(),
            customer_name: payload.customer_name.clone(),
            customer_email: payload.customer_email.clone(),
            customer_phone: payload.customer_phone.clone(),
            start_time,
            end_time,
        })
        .await
        .map_err(|e| internal_error("Failed to create booking", e))?;

    info!(
        "Booked slot {} for business {} (booking {})",
        start_time, payload.business_id, booking.id
    );

    if let Some(notifier) = state.notifier.as_ref() {
        let details = booking_details(&state, &booking.business_id, &service, start_time, end_time, &payload.customer_name).await;
        send_booking_notifications(
            notifier,
            &details,
            &payload.customer_email,
            payload.customer_phone.as_deref(),
            false,
        )
        .await;
    }

    Ok(Json(BookingResponse {
        success: true,
        booking_id: Some(booking.id),
        message: "Appointment booked successfully.".to_string(),
    }))
}

/// Handler to cancel a booking. Admin-gated; see routes.rs.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/cancel",
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Booking cancelled", body = CancellationResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal error")
    ),
    tag = "Booking Admin"
))]
pub async fn cancel_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<CancellationResponse>, (StatusCode, String)> {
    let booking = state
        .bookings
        .find_by_id(&booking_id)
        .await
        .map_err(|e| internal_error("Failed to load booking", e))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("No booking with id {}.", booking_id),
            )
        })?;

    let updated = state
        .bookings
        .update_status(&booking_id, BookingStatus::Cancelled)
        .await
        .map_err(|e| internal_error("Failed to cancel booking", e))?;
    if !updated {
        return Err((
            StatusCode::NOT_FOUND,
            format!("No booking with id {}.", booking_id),
        ));
    }

    info!("Cancelled booking {}", booking_id);

    let notify_customer = payload.notify_customer.unwrap_or(true);
    if notify_customer {
        if let Some(notifier) = state.notifier.as_ref() {
            let service = state
                .businesses
                .find_service(&booking.business_id, &booking.service_id)
                .await
                .ok()
                .flatten();
            let service = match service {
                Some(service) => service,
                None => ServiceOffering {
                    id: booking.service_id.clone(),
                    business_id: booking.business_id.clone(),
                    name: "your appointment".to_string(),
                    duration_minutes: 0,
                    price_cents: 0,
                    currency: String::new(),
                    active: false,
                },
            };
            let details = booking_details(
                &state,
                &booking.business_id,
                &service,
                booking.start_time,
                booking.end_time,
                &booking.customer_name,
            )
            .await;
            send_booking_notifications(
                notifier,
                &details,
                &booking.customer_email,
                booking.customer_phone.as_deref(),
                true,
            )
            .await;
        }
    }

    Ok(Json(CancellationResponse {
        success: true,
        message: "Booking cancelled.".to_string(),
    }))
}

/// Handler to list bookings for a business in a date range. Admin-gated.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings",
    params(AdminBookingsQuery),
    responses(
        (status = 200, description = "Bookings in range", body = BookingListResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal error")
    ),
    tag = "Booking Admin"
))]
pub async fn list_bookings_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<BookingListResponse>, (StatusCode, String)> {
    let start_date = parse_date(&query.start_date, "start_date")?;
    let end_date = parse_date(&query.end_date, "end_date")?;
    if end_date < start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            "end_date must be after start_date".to_string(),
        ));
    }

    let from = start_date.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let to = end_date.and_hms_opt(0, 0, 0).unwrap().and_utc() + Duration::days(1);

    let bookings = state
        .bookings
        .find_between(
            &query.business_id,
            from,
            to,
            query.include_cancelled.unwrap_or(false),
        )
        .await
        .map_err(|e| internal_error("Failed to list bookings", e))?;

    Ok(Json(BookingListResponse { bookings }))
}

// --- Business configuration (admin) ---

/// Handler to fetch a business's booking policy and weekly schedule.
#[axum::debug_handler]
pub async fn get_business_settings_handler(
    State(state): State<Arc<BookingState>>,
    Path(business_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let settings = state
        .businesses
        .get_settings(&business_id)
        .await
        .map_err(|e| internal_error("Failed to load business settings", e))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("No business with id {}.", business_id),
            )
        })?;

    let schedule = state
        .businesses
        .get_schedule(&business_id)
        .await
        .map_err(|e| internal_error("Failed to load weekly schedule", e))?;

    Ok(Json(serde_json::json!({
        "settings": settings,
        "schedule": schedule,
    })))
}

/// Handler to create or update a business's booking policy.
#[axum::debug_handler]
pub async fn upsert_business_settings_handler(
    State(state): State<Arc<BookingState>>,
    Path(business_id): Path<String>,
    Json(mut settings): Json<BusinessSettings>,
) -> Result<Json<BusinessSettings>, (StatusCode, String)> {
    settings.business_id = business_id;
    if settings.buffer_minutes < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "buffer_minutes must be non-negative".to_string(),
        ));
    }

    let stored = state
        .businesses
        .upsert_settings(settings)
        .await
        .map_err(|e| internal_error("Failed to store business settings", e))?;

    Ok(Json(stored))
}

/// Handler to replace a business's weekly schedule.
///
/// Validates each row before anything is written: weekday 0–6 (Sunday = 0),
/// well-formed "HH:mm" times, and open < close for open days. The resolver
/// assumes these invariants, so this is where they are enforced.
#[axum::debug_handler]
pub async fn update_schedule_handler(
    State(state): State<Arc<BookingState>>,
    Path(business_id): Path<String>,
    Json(days): Json<Vec<ScheduleDay>>,
) -> Result<Json<Vec<ScheduleDay>>, (StatusCode, String)> {
    for day in &days {
        if !(0..7).contains(&day.weekday) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("weekday must be 0-6 (Sunday = 0), got {}", day.weekday),
            ));
        }
        let open = crate::logic::parse_clock_time(&day.open)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let close = crate::logic::parse_clock_time(&day.close)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        if day.is_open && open >= close {
            return Err((
                StatusCode::BAD_REQUEST,
                format!(
                    "open must be before close for weekday {} ({} >= {})",
                    day.weekday, day.open, day.close
                ),
            ));
        }
    }

    let mut stored = Vec::with_capacity(days.len());
    for mut day in days {
        day.business_id = business_id.clone();
        stored.push(
            state
                .businesses
                .upsert_schedule_day(day)
                .await
                .map_err(|e| internal_error("Failed to store schedule day", e))?,
        );
    }

    Ok(Json(stored))
}

/// Handler to list a business's service offerings.
#[axum::debug_handler]
pub async fn list_services_handler(
    State(state): State<Arc<BookingState>>,
    Path(business_id): Path<String>,
) -> Result<Json<Vec<ServiceOffering>>, (StatusCode, String)> {
    let services = state
        .businesses
        .list_services(&business_id)
        .await
        .map_err(|e| internal_error("Failed to list services", e))?;

    Ok(Json(services))
}

/// Handler to create or update a service offering.
#[axum::debug_handler]
pub async fn upsert_service_handler(
    State(state): State<Arc<BookingState>>,
    Path(business_id): Path<String>,
    Json(mut service): Json<ServiceOffering>,
) -> Result<Json<ServiceOffering>, (StatusCode, String)> {
    service.business_id = business_id;
    if service.duration_minutes <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "duration_minutes must be positive".to_string(),
        ));
    }

    let stored = state
        .businesses
        .upsert_service(service)
        .await
        .map_err(|e| internal_error("Failed to store service offering", e))?;

    Ok(Json(stored))
}

// --- Notification helpers ---

async fn booking_details(
    state: &BookingState,
    business_id: &str,
    service: &ServiceOffering,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    customer_name: &str,
) -> BookingDetails {
    let business_name = state
        .businesses
        .get_settings(business_id)
        .await
        .ok()
        .flatten()
        .map(|s| s.name)
        .unwrap_or_else(|| business_id.to_string());

    BookingDetails {
        customer_name: customer_name.to_string(),
        business_name,
        service_name: service.name.clone(),
        start_time,
        end_time,
    }
}

/// Deliver confirmation or cancellation messages over the configured
/// channels. Best-effort: failures are logged and never fail the request.
async fn send_booking_notifications(
    notifier: &Arc<dyn NotificationService<Error = BoxedError>>,
    details: &BookingDetails,
    email: &str,
    phone: Option<&str>,
    cancelled: bool,
) {
    let (subject, body, text) = if cancelled {
        (
            cancellation_subject(details),
            cancellation_email_body(details),
            cancellation_whatsapp_text(details),
        )
    } else {
        (
            confirmation_subject(details),
            confirmation_email_body(details),
            confirmation_whatsapp_text(details),
        )
    };

    if let Err(e) = notifier.send_email(email, &subject, &body, false).await {
        error!("Failed to send booking email to {}: {}", email, e);
    }
    if let Some(phone) = phone {
        if let Err(e) = notifier.send_whatsapp(phone, &text).await {
            error!("Failed to send WhatsApp message to {}: {}", phone, e);
        }
    }
}
