#[cfg(test)]
mod tests {
    use crate::logic::{resolve_day_hours, BookSlotRequest, BookedInterval, WeeklySchedule};
    use chrono::NaiveDate;
    use slotify_db::{Booking, BookingStatus, PaymentStatus, ScheduleDay};

    fn schedule_row(weekday: i64, open: &str, close: &str, is_open: bool) -> ScheduleDay {
        ScheduleDay {
            business_id: "studio-nord".to_string(),
            weekday,
            open: open.to_string(),
            close: close.to_string(),
            is_open,
        }
    }

    #[test]
    fn weekly_schedule_from_rows_maps_weekdays() {
        let rows = vec![
            schedule_row(1, "09:00", "17:00", true),
            schedule_row(6, "10:00", "14:00", true),
            schedule_row(0, "00:00", "00:00", false),
        ];
        let schedule = WeeklySchedule::from_rows(&rows);

        // Monday, May 4 2026 resolves through index 1.
        let monday = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert_eq!(resolve_day_hours(&schedule, monday).unwrap().open, "09:00");

        // Saturday resolves through index 6.
        let saturday = NaiveDate::from_ymd_opt(2026, 5, 9).unwrap();
        assert_eq!(resolve_day_hours(&schedule, saturday).unwrap().close, "14:00");

        // Sunday row exists but is closed.
        let sunday = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        assert!(resolve_day_hours(&schedule, sunday).is_none());
    }

    #[test]
    fn weekly_schedule_from_rows_skips_out_of_range_weekdays() {
        let rows = vec![
            schedule_row(7, "09:00", "17:00", true),
            schedule_row(-1, "09:00", "17:00", true),
        ];
        let schedule = WeeklySchedule::from_rows(&rows);
        for weekday in 0..7 {
            assert!(schedule.day(weekday).is_none());
        }
    }

    #[test]
    fn booked_interval_from_booking_row() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
            .and_utc();
        let end = start + chrono::Duration::minutes(45);
        let booking = Booking {
            id: "b-1".to_string(),
            business_id: "studio-nord".to_string(),
            service_id: "consult-45".to_string(),
            customer_name: "Anna Keller".to_string(),
            customer_email: "anna@example.com".to_string(),
            customer_phone: None,
            start_time: start,
            end_time: end,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_provider: Some("stripe".to_string()),
            payment_ref: Some("pi_123".to_string()),
            created_at: None,
            updated_at: None,
        };

        let interval = BookedInterval::from(&booking);
        assert_eq!(interval.start_time, start);
        assert_eq!(interval.end_time, end);
    }

    #[test]
    fn book_slot_request_deserializes_without_phone() {
        let request: BookSlotRequest = serde_json::from_str(
            r#"{
                "business_id": "studio-nord",
                "service_id": "consult-45",
                "start_time": "2026-05-04T10:00:00+00:00",
                "customer_name": "Anna Keller",
                "customer_email": "anna@example.com"
            }"#,
        )
        .unwrap();
        assert_eq!(request.service_id, "consult-45");
        assert!(request.customer_phone.is_none());
    }
}
