//! Repositories for database access

pub mod booking;
pub mod booking_sql;
pub mod business;
pub mod business_sql;

pub use booking::{Booking, BookingRepository, BookingStatus, NewBooking, PaymentStatus};
pub use booking_sql::SqlBookingRepository;
pub use business::{BusinessRepository, BusinessSettings, ScheduleDay, ServiceOffering};
pub use business_sql::SqlBusinessRepository;
