#[cfg(test)]
mod tests {
    use crate::logic::{
        available_slots, generate_slots, intervals_overlap, parse_clock_time, resolve_day_hours,
        BookedInterval, BookingError, DayHours, WeeklySchedule, SLOT_STEP_MINUTES,
    };
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    fn hours(open: &str, close: &str) -> DayHours {
        DayHours {
            open: open.to_string(),
            close: close.to_string(),
            is_open: true,
        }
    }

    fn monday() -> NaiveDate {
        // Monday, May 4 2026
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
    }

    fn booking(date: NaiveDate, h1: u32, m1: u32, h2: u32, m2: u32) -> BookedInterval {
        BookedInterval {
            start_time: at(date, h1, m1),
            end_time: at(date, h2, m2),
        }
    }

    #[test]
    fn test_absent_day_yields_no_slots() {
        let slots = generate_slots(monday(), None, 30, &[], 0).unwrap();
        assert!(slots.is_empty(), "Absent day should produce no slots");
    }

    #[test]
    fn test_closed_day_yields_no_slots() {
        let closed = DayHours {
            open: "09:00".to_string(),
            close: "17:00".to_string(),
            is_open: false,
        };
        let slots = generate_slots(monday(), Some(&closed), 30, &[], 0).unwrap();
        assert!(slots.is_empty(), "Closed day should produce no slots");
    }

    #[test]
    fn test_slot_count_matches_grid_formula() {
        // With no bookings and no buffer, the count is
        // floor((close - open - duration) / step) + 1.
        let day = hours("09:00", "17:00");
        let duration = 60;
        let slots = generate_slots(monday(), Some(&day), duration, &[], 0).unwrap();

        let window_minutes = 8 * 60;
        let expected = (window_minutes - duration) / SLOT_STEP_MINUTES + 1;
        assert_eq!(
            slots.len() as i64,
            expected,
            "Expected {} slots for a {}-minute window",
            expected,
            window_minutes
        );

        assert_eq!(slots[0], at(monday(), 9, 0), "First slot should be open");
        let last = *slots.last().unwrap();
        assert!(
            last + Duration::minutes(duration) <= at(monday(), 17, 0),
            "Last slot must still fit before close"
        );

        for pair in slots.windows(2) {
            assert_eq!(
                pair[1] - pair[0],
                Duration::minutes(SLOT_STEP_MINUTES),
                "Slots should be exactly one grid step apart"
            );
        }
    }

    #[test]
    fn test_duration_filling_whole_window_yields_single_slot() {
        let day = hours("09:00", "10:00");
        let slots = generate_slots(monday(), Some(&day), 60, &[], 0).unwrap();
        assert_eq!(slots, vec![at(monday(), 9, 0)]);
    }

    #[test]
    fn test_slot_ending_exactly_at_close_is_valid() {
        let day = hours("09:00", "17:00");
        let slots = generate_slots(monday(), Some(&day), 30, &[], 0).unwrap();
        assert!(
            slots.contains(&at(monday(), 16, 30)),
            "A slot ending exactly at closing time must be offered"
        );
        assert!(
            !slots.contains(&at(monday(), 17, 0)),
            "No slot may start at closing time"
        );
    }

    #[test]
    fn test_buffer_excludes_padded_conflicts() {
        // Hours 09:00-17:00, duration 30, booking 10:00-10:30, buffer 15.
        // Padding makes 09:30, 10:00 and 10:30 collide; 09:00 and 11:00 stay.
        let day = hours("09:00", "17:00");
        let existing = [booking(monday(), 10, 0, 10, 30)];
        let slots = generate_slots(monday(), Some(&day), 30, &existing, 15).unwrap();

        for blocked in [at(monday(), 9, 30), at(monday(), 10, 0), at(monday(), 10, 30)] {
            assert!(
                !slots.contains(&blocked),
                "Slot {} should be blocked by the buffered booking",
                blocked
            );
        }
        for free in [at(monday(), 9, 0), at(monday(), 11, 0)] {
            assert!(
                slots.contains(&free),
                "Slot {} should remain bookable",
                free
            );
        }
    }

    #[test]
    fn test_touching_bookings_do_not_conflict_without_buffer() {
        // Buffer 0: a candidate that ends exactly when a booking starts, or
        // starts exactly when it ends, is accepted.
        let day = hours("09:00", "17:00");
        let existing = [booking(monday(), 10, 0, 10, 30)];
        let slots = generate_slots(monday(), Some(&day), 30, &existing, 0).unwrap();

        assert!(
            slots.contains(&at(monday(), 9, 30)),
            "Candidate ending at booking start must be accepted"
        );
        assert!(
            slots.contains(&at(monday(), 10, 30)),
            "Candidate starting at booking end must be accepted"
        );
        assert!(
            !slots.contains(&at(monday(), 10, 0)),
            "Candidate equal to the booking must be rejected"
        );
    }

    #[test]
    fn test_zero_buffer_matches_exact_overlap_test() {
        let day = hours("09:00", "12:00");
        let existing = [booking(monday(), 10, 0, 11, 0)];

        let with_zero = generate_slots(monday(), Some(&day), 30, &existing, 0).unwrap();
        let expected: Vec<_> = generate_slots(monday(), Some(&day), 30, &[], 0)
            .unwrap()
            .into_iter()
            .filter(|start| {
                let end = *start + Duration::minutes(30);
                !intervals_overlap(*start, end, existing[0].start_time, existing[0].end_time)
            })
            .collect();

        assert_eq!(with_zero, expected);
    }

    #[test]
    fn test_generate_slots_is_idempotent() {
        let day = hours("08:30", "18:00");
        let existing = [
            booking(monday(), 9, 0, 9, 45),
            booking(monday(), 13, 0, 14, 0),
        ];
        let first = generate_slots(monday(), Some(&day), 45, &existing, 10).unwrap();
        let second = generate_slots(monday(), Some(&day), 45, &existing, 10).unwrap();
        assert_eq!(first, second, "Identical inputs must yield identical output");

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted, "Output must already be in ascending order");
    }

    #[test]
    fn test_overlap_predicate_is_commutative() {
        let date = monday();
        let cases = [
            (at(date, 9, 0), at(date, 10, 0), at(date, 9, 30), at(date, 10, 30)),
            (at(date, 9, 0), at(date, 10, 0), at(date, 10, 0), at(date, 11, 0)),
            (at(date, 9, 0), at(date, 12, 0), at(date, 10, 0), at(date, 10, 30)),
            (at(date, 9, 0), at(date, 9, 30), at(date, 14, 0), at(date, 15, 0)),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(
                intervals_overlap(a1, a2, b1, b2),
                intervals_overlap(b1, b2, a1, a2),
                "Overlap test must be commutative for {:?}..{:?} vs {:?}..{:?}",
                a1,
                a2,
                b1,
                b2
            );
        }
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let date = monday();
        assert!(!intervals_overlap(
            at(date, 9, 0),
            at(date, 10, 0),
            at(date, 10, 0),
            at(date, 11, 0)
        ));
        assert!(intervals_overlap(
            at(date, 9, 0),
            at(date, 10, 1),
            at(date, 10, 0),
            at(date, 11, 0)
        ));
    }

    #[test]
    fn test_malformed_time_fails_loudly() {
        let day = DayHours {
            open: "9am".to_string(),
            close: "17:00".to_string(),
            is_open: true,
        };
        let result = generate_slots(monday(), Some(&day), 30, &[], 0);
        assert!(matches!(result, Err(BookingError::TimeParse(_))));
    }

    #[test]
    fn test_invalid_duration_and_buffer_are_rejected() {
        let day = hours("09:00", "17:00");
        assert!(matches!(
            generate_slots(monday(), Some(&day), 0, &[], 0),
            Err(BookingError::InvalidDuration(0))
        ));
        assert!(matches!(
            generate_slots(monday(), Some(&day), 30, &[], -5),
            Err(BookingError::InvalidBuffer(-5))
        ));
    }

    #[test]
    fn test_resolve_day_hours_uses_sunday_zero_indexing() {
        let mut schedule = WeeklySchedule::default();
        // Monday is index 1 with Sunday = 0.
        schedule.set_day(1, hours("09:00", "17:00"));

        let resolved = resolve_day_hours(&schedule, monday());
        assert!(resolved.is_some(), "Monday entry should resolve");
        assert_eq!(resolved.unwrap().open, "09:00");

        // Sunday, May 3 2026 has no entry.
        let sunday = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        assert!(resolve_day_hours(&schedule, sunday).is_none());
    }

    #[test]
    fn test_resolve_day_hours_skips_closed_days() {
        let mut schedule = WeeklySchedule::default();
        schedule.set_day(
            1,
            DayHours {
                open: "09:00".to_string(),
                close: "17:00".to_string(),
                is_open: false,
            },
        );
        assert!(
            resolve_day_hours(&schedule, monday()).is_none(),
            "A day marked closed should resolve to absent"
        );
    }

    #[test]
    fn test_available_slots_composes_lookup_and_generation() {
        let mut schedule = WeeklySchedule::default();
        schedule.set_day(1, hours("09:00", "11:00"));

        let slots = available_slots(&schedule, monday(), 30, &[], 0).unwrap();
        assert_eq!(
            slots,
            vec![
                at(monday(), 9, 0),
                at(monday(), 9, 30),
                at(monday(), 10, 0),
                at(monday(), 10, 30),
            ]
        );

        // A date whose weekday has no schedule entry yields nothing.
        let sunday = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
        assert!(available_slots(&schedule, sunday, 30, &[], 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_clock_time_round_trip() {
        let parsed = parse_clock_time("08:05").unwrap();
        assert_eq!(crate::logic::format_clock_time(parsed), "08:05");
        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("").is_err());
    }
}
