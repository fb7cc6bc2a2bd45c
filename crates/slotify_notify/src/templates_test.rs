#[cfg(test)]
mod tests {
    use crate::templates::{
        cancellation_email_body, cancellation_whatsapp_text, confirmation_email_body,
        confirmation_subject, confirmation_whatsapp_text, BookingDetails,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn sample_details() -> BookingDetails {
        let start = Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap();
        BookingDetails {
            customer_name: "Anna Keller".to_string(),
            business_name: "Studio Nord".to_string(),
            service_name: "Consultation".to_string(),
            start_time: start,
            end_time: start + Duration::minutes(45),
        }
    }

    #[test]
    fn confirmation_subject_names_service_and_business() {
        let subject = confirmation_subject(&sample_details());
        assert_eq!(subject, "Booking confirmed: Consultation at Studio Nord");
    }

    #[test]
    fn confirmation_email_contains_customer_and_times() {
        let body = confirmation_email_body(&sample_details());
        assert!(body.contains("Hello Anna Keller"));
        assert!(body.contains("Monday, 14 September 2026"));
        assert!(body.contains("10:00"));
        assert!(body.contains("10:45"));
    }

    #[test]
    fn whatsapp_texts_are_single_line() {
        let details = sample_details();
        assert!(!confirmation_whatsapp_text(&details).contains('\n'));
        assert!(!cancellation_whatsapp_text(&details).contains('\n'));
    }

    #[test]
    fn cancellation_email_mentions_cancellation() {
        let body = cancellation_email_body(&sample_details());
        assert!(body.contains("has been cancelled"));
        assert!(body.contains("Consultation"));
    }
}
