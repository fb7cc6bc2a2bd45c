use chrono::{DateTime, Duration, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slotify_booking::logic::{generate_slots, BookedInterval, DayHours};

// Helper function to build an open day
fn day_hours(open: &str, close: &str) -> DayHours {
    DayHours {
        open: open.to_string(),
        close: close.to_string(),
        is_open: true,
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

// Helper function to create a list of bookings spread over the day
fn create_bookings(date: NaiveDate, count: usize, duration_minutes: i64) -> Vec<BookedInterval> {
    let mut bookings = Vec::new();
    let mut start = at(date, 8, 0);
    for _ in 0..count {
        let end = start + Duration::minutes(duration_minutes.max(15));
        bookings.push(BookedInterval {
            start_time: start,
            end_time: end,
        });
        start = end + Duration::minutes(30);
    }
    bookings
}

fn benchmark_generate_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_slots");

    // Benchmark with no bookings
    group.bench_function("no_bookings", |b| {
        b.iter(|| {
            let date = test_date();
            let day = day_hours("09:00", "17:00");
            let bookings = Vec::new();

            generate_slots(
                black_box(date),
                black_box(Some(&day)),
                black_box(60),
                black_box(&bookings),
                black_box(0),
            )
        })
    });

    // Benchmark with a few bookings
    group.bench_function("few_bookings", |b| {
        b.iter(|| {
            let date = test_date();
            let day = day_hours("09:00", "17:00");
            let bookings = create_bookings(date, 5, 45);

            generate_slots(
                black_box(date),
                black_box(Some(&day)),
                black_box(60),
                black_box(&bookings),
                black_box(15),
            )
        })
    });

    // Benchmark a fully packed day
    group.bench_function("packed_day", |b| {
        b.iter(|| {
            let date = test_date();
            let day = day_hours("00:00", "23:30");
            let bookings = create_bookings(date, 20, 30);

            generate_slots(
                black_box(date),
                black_box(Some(&day)),
                black_box(30),
                black_box(&bookings),
                black_box(10),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_generate_slots);
criterion_main!(benches);
