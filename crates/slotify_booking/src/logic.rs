// --- File: crates/slotify_booking/src/logic.rs ---
//! Availability resolution: maps a business's weekly schedule, a service
//! duration, a buffer policy, and the day's committed bookings to the ordered
//! set of bookable start instants.
//!
//! Everything here is pure and synchronous. Inputs are request-scoped
//! snapshots read from the store immediately before the call; the output is
//! recomputed on every call and never cached. The resolver is advisory only:
//! callers must re-validate against a fresh booking snapshot inside the same
//! transaction that inserts a new booking row.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Failed to parse time: {0}")]
    TimeParse(String),
    #[error("Invalid service duration: {0} minutes")]
    InvalidDuration(i64),
    #[error("Invalid buffer: {0} minutes")]
    InvalidBuffer(i64),
    #[error("Requested slot is no longer available")]
    Conflict,
    #[error("No service offered with id: {0}")]
    UnknownService(String),
    #[error("Database error: {0}")]
    Database(#[from] slotify_db::DbError),
}

impl From<BookingError> for slotify_common::SlotifyError {
    fn from(err: BookingError) -> Self {
        use slotify_common::SlotifyError;
        match err {
            BookingError::TimeParse(msg) => SlotifyError::ParseError(msg),
            BookingError::InvalidDuration(d) => {
                SlotifyError::ValidationError(format!("invalid service duration: {} minutes", d))
            }
            BookingError::InvalidBuffer(b) => {
                SlotifyError::ValidationError(format!("invalid buffer: {} minutes", b))
            }
            BookingError::Conflict => {
                SlotifyError::ConflictError("requested slot is no longer available".to_string())
            }
            BookingError::UnknownService(id) => {
                SlotifyError::NotFoundError(format!("no service offered with id: {}", id))
            }
            BookingError::Database(e) => SlotifyError::DatabaseError(e.to_string()),
        }
    }
}

// --- API Data Structures ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Business whose calendar is being queried
    pub business_id: String,

    /// Service to book; its duration drives the slot grid
    pub service_id: String,

    /// Target date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-09-14"))]
    pub date: String,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailableSlot {
    #[cfg_attr(feature = "openapi", schema(example = "2026-09-14T10:00:00+00:00"))]
    pub start_time: String, // ISO 8601 format
    #[cfg_attr(feature = "openapi", schema(example = "2026-09-14T10:45:00+00:00"))]
    pub end_time: String, // ISO 8601 format
    #[cfg_attr(feature = "openapi", schema(example = 45))]
    pub duration_minutes: i64,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailableSlotsResponse {
    pub slots: Vec<AvailableSlot>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookSlotRequest {
    pub business_id: String,
    pub service_id: String,
    /// Requested slot start in ISO 8601 format; must match a currently
    /// available slot exactly.
    pub start_time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub booking_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CancelBookingRequest {
    pub notify_customer: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AdminBookingsQuery {
    pub business_id: String,
    pub start_date: String,              // YYYY-MM-DD format
    pub end_date: String,                // YYYY-MM-DD format
    pub include_cancelled: Option<bool>, // Whether to include cancelled bookings
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<slotify_db::Booking>,
}

// --- Data Structures ---

/// Candidate start instants are generated on a fixed half-hour grid.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// One weekday's opening hours as stored in business configuration.
/// `open`/`close` are wall-clock "HH:mm" strings with `open < close`
/// whenever `is_open` is true (enforced on write, assumed here).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DayHours {
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub open: String,
    #[cfg_attr(feature = "openapi", schema(example = "17:00"))]
    pub close: String,
    pub is_open: bool,
}

/// A business's recurring weekly hours, one optional entry per weekday,
/// indexed 0–6 with Sunday = 0. A missing entry means the business has no
/// data for that day, which reads the same as closed.
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    days: [Option<DayHours>; 7],
}

impl WeeklySchedule {
    pub fn new(days: [Option<DayHours>; 7]) -> Self {
        Self { days }
    }

    /// Set the hours for one weekday (0 = Sunday … 6 = Saturday).
    /// Out-of-range indices are ignored.
    pub fn set_day(&mut self, weekday: usize, hours: DayHours) {
        if let Some(slot) = self.days.get_mut(weekday) {
            *slot = Some(hours);
        }
    }

    pub fn day(&self, weekday: usize) -> Option<&DayHours> {
        self.days.get(weekday).and_then(|d| d.as_ref())
    }

    /// Builds a schedule from persisted per-weekday rows. Rows with an
    /// out-of-range weekday are skipped; later rows win on duplicates.
    pub fn from_rows(rows: &[slotify_db::ScheduleDay]) -> Self {
        let mut schedule = Self::default();
        for row in rows {
            if let Ok(weekday) = usize::try_from(row.weekday) {
                schedule.set_day(
                    weekday,
                    DayHours {
                        open: row.open.clone(),
                        close: row.close.clone(),
                        is_open: row.is_open,
                    },
                );
            }
        }
        schedule
    }
}

/// An already-committed reservation occupying time on the target day.
/// Only pending/confirmed bookings belong here; cancelled rows must be
/// filtered out by the caller's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&slotify_db::Booking> for BookedInterval {
    fn from(booking: &slotify_db::Booking) -> Self {
        Self {
            start_time: booking.start_time,
            end_time: booking.end_time,
        }
    }
}

// --- Time Helpers ---

/// Parses a wall-clock "HH:mm" string.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| BookingError::TimeParse(value.to_string()))
}

/// Anchors a wall-clock time to the start of the target calendar day, so
/// later arithmetic operates on instants rather than bare strings.
pub fn clock_time_on(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Formats a wall-clock time back to "HH:mm".
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

// --- Availability Logic ---

/// Strict-overlap test on half-open intervals `[start, end)`: the intervals
/// share at least one instant. Touching endpoints do not overlap. The test
/// is commutative in its two intervals.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Selects the schedule entry for `date`'s day of week.
///
/// Returns `None` when the business has no data for that day or the day is
/// marked closed. Absence is an expected state, not an error.
pub fn resolve_day_hours(schedule: &WeeklySchedule, date: NaiveDate) -> Option<&DayHours> {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    schedule.day(weekday).filter(|hours| hours.is_open)
}

/// Generates the ordered candidate start instants for one day.
///
/// Candidates run from `open` in fixed half-hour steps while the slot still
/// ends at or before `close` (a slot ending exactly at closing time is
/// valid). Each candidate's occupied interval `[start, start + duration)` is
/// expanded symmetrically by `buffer_minutes` on both ends and tested
/// against the *unpadded* existing bookings; bookings themselves are never
/// expanded, so back-to-back existing bookings still block buffer zones in
/// both directions. A zero buffer reduces to the exact overlap test.
///
/// A closed or absent day yields an empty list. Malformed "HH:mm" strings
/// are a config-validation failure upstream and are rejected loudly here
/// rather than producing a garbage grid.
pub fn generate_slots(
    date: NaiveDate,
    day_hours: Option<&DayHours>,
    duration_minutes: i64,
    existing_bookings: &[BookedInterval],
    buffer_minutes: i64,
) -> Result<Vec<DateTime<Utc>>, BookingError> {
    if duration_minutes <= 0 {
        return Err(BookingError::InvalidDuration(duration_minutes));
    }
    if buffer_minutes < 0 {
        return Err(BookingError::InvalidBuffer(buffer_minutes));
    }

    let hours = match day_hours {
        Some(hours) if hours.is_open => hours,
        _ => return Ok(Vec::new()),
    };

    let open = clock_time_on(date, parse_clock_time(&hours.open)?);
    let close = clock_time_on(date, parse_clock_time(&hours.close)?);

    let duration = Duration::minutes(duration_minutes);
    let buffer = Duration::minutes(buffer_minutes);
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    debug!(
        "Generating slots for {} between {} and {} ({} bookings, buffer {}m)",
        date,
        hours.open,
        hours.close,
        existing_bookings.len(),
        buffer_minutes
    );

    let mut slots = Vec::new();
    let mut candidate = open;
    // Grid order is chronological, so the result needs no separate sort.
    while candidate + duration <= close {
        let padded_start = candidate - buffer;
        let padded_end = candidate + duration + buffer;

        let conflicts = existing_bookings.iter().any(|booking| {
            intervals_overlap(padded_start, padded_end, booking.start_time, booking.end_time)
        });

        if !conflicts {
            slots.push(candidate);
        }
        candidate += step;
    }

    Ok(slots)
}

/// Resolves the bookable start instants for a service on one date: schedule
/// lookup followed by grid generation. This is the single entry point the
/// request handlers use.
pub fn available_slots(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    duration_minutes: i64,
    existing_bookings: &[BookedInterval],
    buffer_minutes: i64,
) -> Result<Vec<DateTime<Utc>>, BookingError> {
    let day_hours = resolve_day_hours(schedule, date);
    generate_slots(
        date,
        day_hours,
        duration_minutes,
        existing_bookings,
        buffer_minutes,
    )
}
