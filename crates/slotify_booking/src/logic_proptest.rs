#[cfg(test)]
mod tests {
    use crate::logic::{generate_slots, BookedInterval, DayHours, SLOT_STEP_MINUTES};
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use proptest::prelude::*;

    // Helper function to build an open day from whole hours
    fn day_hours(open_hour: u32, close_hour: u32) -> DayHours {
        DayHours {
            open: format!("{:02}:00", open_hour),
            close: format!("{:02}:00", close_hour),
            is_open: true,
        }
    }

    // Helper function to anchor a wall-clock time on the test date
    fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
    }

    // Helper function to create non-overlapping bookings spread over the day
    fn create_bookings(
        date: NaiveDate,
        count: usize,
        duration_minutes: i64,
    ) -> Vec<BookedInterval> {
        let mut bookings = Vec::new();
        let mut start = at(date, 8, 0);
        for _ in 0..count {
            let end = start + Duration::minutes(duration_minutes.max(15));
            bookings.push(BookedInterval {
                start_time: start,
                end_time: end,
            });
            start = end + Duration::minutes(60);
        }
        bookings
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    proptest! {
        // Test that every slot lies on the grid and fits inside opening hours
        #[test]
        fn test_slots_on_grid_within_hours(
            open_hour in 0u32..12,
            close_hour in 13u32..24,
            duration_minutes in 15i64..120,
            buffer_minutes in 0i64..45,
            booking_count in 0usize..5,
        ) {
            let date = test_date();
            let day = day_hours(open_hour, close_hour);
            let bookings = create_bookings(date, booking_count, 90);

            let slots = generate_slots(
                date,
                Some(&day),
                duration_minutes,
                &bookings,
                buffer_minutes,
            ).unwrap();

            let open = at(date, open_hour, 0);
            let close = at(date, close_hour, 0);

            for slot in &slots {
                prop_assert!(*slot >= open,
                    "Slot {} should not start before opening {}", slot, open);
                prop_assert!(*slot + Duration::minutes(duration_minutes) <= close,
                    "Slot {} should end at or before closing {}", slot, close);

                let offset = (*slot - open).num_minutes();
                prop_assert_eq!(offset % SLOT_STEP_MINUTES, 0,
                    "Slot {} should lie on the {}-minute grid", slot, SLOT_STEP_MINUTES);
            }
        }

        // Test that no offered slot overlaps an existing booking, even with
        // buffer padding in play (the padded interval only shrinks the offer)
        #[test]
        fn test_slots_dont_overlap_bookings(
            duration_minutes in 15i64..120,
            buffer_minutes in 0i64..45,
            booking_count in 1usize..5,
            booking_duration in 15i64..120,
        ) {
            let date = test_date();
            let day = day_hours(0, 23);
            let bookings = create_bookings(date, booking_count, booking_duration);

            let slots = generate_slots(
                date,
                Some(&day),
                duration_minutes,
                &bookings,
                buffer_minutes,
            ).unwrap();

            for slot in &slots {
                let slot_end = *slot + Duration::minutes(duration_minutes);
                for booking in &bookings {
                    // Check for overlap: (StartA < EndB) and (EndA > StartB)
                    let overlaps = *slot < booking.end_time && slot_end > booking.start_time;
                    prop_assert!(!overlaps,
                        "Slot {} to {} overlaps with booking {} to {}",
                        slot, slot_end, booking.start_time, booking.end_time);
                }
            }
        }

        // Test that a zero buffer admits every slot a positive buffer admits
        #[test]
        fn test_buffer_only_removes_slots(
            duration_minutes in 15i64..90,
            buffer_minutes in 1i64..45,
            booking_count in 0usize..4,
        ) {
            let date = test_date();
            let day = day_hours(7, 20);
            let bookings = create_bookings(date, booking_count, 60);

            let unbuffered = generate_slots(date, Some(&day), duration_minutes, &bookings, 0).unwrap();
            let buffered = generate_slots(
                date,
                Some(&day),
                duration_minutes,
                &bookings,
                buffer_minutes,
            ).unwrap();

            for slot in &buffered {
                prop_assert!(unbuffered.contains(slot),
                    "Buffered slot {} must also be valid without buffer", slot);
            }
        }

        // Test that output order is stable and strictly ascending
        #[test]
        fn test_slots_strictly_ascending(
            duration_minutes in 15i64..120,
            buffer_minutes in 0i64..45,
            booking_count in 0usize..5,
        ) {
            let date = test_date();
            let day = day_hours(6, 22);
            let bookings = create_bookings(date, booking_count, 45);

            let slots = generate_slots(
                date,
                Some(&day),
                duration_minutes,
                &bookings,
                buffer_minutes,
            ).unwrap();

            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1],
                    "Slots must be strictly ascending: {} then {}", pair[0], pair[1]);
            }
        }
    }
}
