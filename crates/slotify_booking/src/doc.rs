// File: crates/slotify_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityQuery, AvailableSlot, AvailableSlotsResponse, BookSlotRequest, BookingResponse,
    CancelBookingRequest, CancellationResponse, DayHours,
};

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("business_id" = String, Query, description = "Business whose calendar is queried"),
        ("service_id" = String, Query, description = "Service to book"),
        ("date" = String, Query, description = "Target date in YYYY-MM-DD format", example = "2026-09-14", format = "date")
    ),
    responses(
        (status = 200, description = "Available time slots", body = AvailableSlotsResponse),
        (status = 404, description = "Unknown service", body = String),
        (status = 500, description = "Internal error", body = String)
    ),
    tag = "Booking"
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/bookings",
    request_body(content = BookSlotRequest, example = json!({
        "business_id": "studio-nord",
        "service_id": "consult-45",
        "start_time": "2026-09-14T10:00:00+00:00",
        "customer_name": "Anna Keller",
        "customer_email": "anna@example.com",
        "customer_phone": "+41791234567"
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse,
         example = json!({
             "success": true,
             "booking_id": "7d8f3b1e-4c6a-4b2f-9d0e-2f1a6c8b5e77",
             "message": "Appointment booked successfully."
         })
        ),
        (status = 409, description = "Slot already booked",
         example = json!({
             "success": false,
             "booking_id": null,
             "message": "Requested time slot is no longer available."
         })
        )
    ),
    tag = "Booking"
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    post,
    path = "/admin/bookings/{booking_id}/cancel",
    params(("booking_id" = String, Path, description = "Booking to cancel")),
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Booking cancelled", body = CancellationResponse),
        (status = 401, description = "Missing or invalid admin secret"),
        (status = 404, description = "Booking not found")
    ),
    tag = "Booking Admin"
)]
fn doc_cancel_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_book_slot_handler,
        doc_cancel_booking_handler
    ),
    components(schemas(
        AvailabilityQuery,
        AvailableSlot,
        AvailableSlotsResponse,
        BookSlotRequest,
        BookingResponse,
        CancelBookingRequest,
        CancellationResponse,
        DayHours
    )),
    tags(
        (name = "Booking", description = "Availability and booking API"),
        (name = "Booking Admin", description = "Admin booking management")
    )
)]
pub struct BookingApiDoc;
