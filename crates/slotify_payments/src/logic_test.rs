#[cfg(test)]
mod tests {
    use crate::logic::{
        process_payment_webhook, sign_payload, verify_webhook_signature, PaymentEvent,
        DEFAULT_TOLERANCE_SECONDS,
    };
    use crate::PaymentsError;
    use chrono::{DateTime, Duration, Utc};
    use slotify_db::{
        Booking, BookingRepository, BookingStatus, DbError, NewBooking, PaymentStatus,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "whsec_test_secret";

    fn now_unix() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    // --- Signature verification ---

    #[test]
    fn valid_signature_is_accepted() {
        let payload = br#"{"id":"evt_1","type":"checkout.completed"}"#;
        let header = sign_payload(payload, SECRET, now_unix());
        assert!(verify_webhook_signature(
            payload,
            Some(&header),
            SECRET,
            DEFAULT_TOLERANCE_SECONDS
        )
        .is_ok());
    }

    #[test]
    fn missing_header_is_rejected() {
        let result =
            verify_webhook_signature(b"{}", None, SECRET, DEFAULT_TOLERANCE_SECONDS);
        assert!(matches!(
            result,
            Err(PaymentsError::WebhookSignatureError(_))
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let header = sign_payload(b"original body", SECRET, now_unix());
        let result = verify_webhook_signature(
            b"tampered body",
            Some(&header),
            SECRET,
            DEFAULT_TOLERANCE_SECONDS,
        );
        assert!(matches!(
            result,
            Err(PaymentsError::WebhookSignatureError(_))
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let payload = b"body";
        let header = sign_payload(payload, "whsec_other", now_unix());
        let result = verify_webhook_signature(
            payload,
            Some(&header),
            SECRET,
            DEFAULT_TOLERANCE_SECONDS,
        );
        assert!(matches!(
            result,
            Err(PaymentsError::WebhookSignatureError(_))
        ));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let payload = b"body";
        let header = sign_payload(payload, SECRET, now_unix() - 2 * DEFAULT_TOLERANCE_SECONDS);
        let result = verify_webhook_signature(
            payload,
            Some(&header),
            SECRET,
            DEFAULT_TOLERANCE_SECONDS,
        );
        assert!(matches!(
            result,
            Err(PaymentsError::WebhookSignatureError(_))
        ));
    }

    #[test]
    fn any_matching_v1_candidate_is_accepted() {
        let payload = b"body";
        let timestamp = now_unix();
        let good = sign_payload(payload, SECRET, timestamp);
        let good_sig = good.split("v1=").nth(1).unwrap();
        let header = format!("t={},v1={},v1={}", timestamp, "0".repeat(64), good_sig);
        assert!(verify_webhook_signature(
            payload,
            Some(&header),
            SECRET,
            DEFAULT_TOLERANCE_SECONDS
        )
        .is_ok());
    }

    // --- Event processing ---

    /// In-memory repository standing in for the SQL implementation.
    #[derive(Default)]
    struct FakeBookingRepository {
        rows: Mutex<HashMap<String, Booking>>,
    }

    impl FakeBookingRepository {
        fn with_booking(id: &str) -> Self {
            let repo = Self::default();
            let start = Utc::now();
            repo.rows.lock().unwrap().insert(
                id.to_string(),
                Booking {
                    id: id.to_string(),
                    business_id: "studio-nord".to_string(),
                    service_id: "consult-45".to_string(),
                    customer_name: "Anna Keller".to_string(),
                    customer_email: "anna@example.com".to_string(),
                    customer_phone: None,
                    start_time: start,
                    end_time: start + Duration::minutes(45),
                    status: BookingStatus::Pending,
                    payment_status: PaymentStatus::Unpaid,
                    payment_provider: None,
                    payment_ref: None,
                    created_at: None,
                    updated_at: None,
                },
            );
            repo
        }

        fn get(&self, id: &str) -> Option<Booking> {
            self.rows.lock().unwrap().get(id).cloned()
        }
    }

    impl BookingRepository for FakeBookingRepository {
        async fn init_schema(&self) -> Result<(), DbError> {
            Ok(())
        }

        async fn create(&self, _booking: NewBooking) -> Result<Booking, DbError> {
            unimplemented!("not used by webhook processing")
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
            Ok(self.get(id))
        }

        async fn find_active_between(
            &self,
            _business_id: &str,
            _from: DateTime<Utc>,
            _to: DateTime<Utc>,
        ) -> Result<Vec<Booking>, DbError> {
            Ok(Vec::new())
        }

        async fn find_between(
            &self,
            _business_id: &str,
            _from: DateTime<Utc>,
            _to: DateTime<Utc>,
            _include_cancelled: bool,
        ) -> Result<Vec<Booking>, DbError> {
            Ok(Vec::new())
        }

        async fn update_status(&self, id: &str, status: BookingStatus) -> Result<bool, DbError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(id) {
                Some(row) => {
                    row.status = status;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn mark_paid(
            &self,
            id: &str,
            provider: &str,
            payment_ref: &str,
        ) -> Result<bool, DbError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(id) {
                Some(row) => {
                    row.payment_status = PaymentStatus::Paid;
                    row.payment_provider = Some(provider.to_string());
                    row.payment_ref = Some(payment_ref.to_string());
                    row.status = BookingStatus::Confirmed;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn mark_refunded(&self, id: &str) -> Result<bool, DbError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(id) {
                Some(row) if row.payment_status == PaymentStatus::Paid => {
                    row.payment_status = PaymentStatus::Refunded;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn event(event_type: &str, object: serde_json::Value) -> PaymentEvent {
        serde_json::from_value(serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "created": now_unix(),
            "data": { "object": object },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn paid_checkout_confirms_booking() {
        let repo = FakeBookingRepository::with_booking("b-1");
        let event = event(
            "checkout.completed",
            serde_json::json!({
                "id": "pay_1",
                "amount": 7500,
                "currency": "CHF",
                "payment_status": "paid",
                "metadata": { "booking_id": "b-1" },
            }),
        );

        process_payment_webhook(event, "stripe", &repo).await.unwrap();

        let booking = repo.get("b-1").unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_provider.as_deref(), Some("stripe"));
        assert_eq!(booking.payment_ref.as_deref(), Some("pay_1"));
    }

    #[tokio::test]
    async fn unpaid_checkout_leaves_booking_untouched() {
        let repo = FakeBookingRepository::with_booking("b-1");
        let event = event(
            "checkout.completed",
            serde_json::json!({
                "id": "pay_1",
                "payment_status": "unpaid",
                "metadata": { "booking_id": "b-1" },
            }),
        );

        process_payment_webhook(event, "stripe", &repo).await.unwrap();

        let booking = repo.get("b-1").unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn missing_booking_reference_is_an_error() {
        let repo = FakeBookingRepository::with_booking("b-1");
        let event = event(
            "checkout.completed",
            serde_json::json!({ "id": "pay_1", "payment_status": "paid" }),
        );

        let result = process_payment_webhook(event, "stripe", &repo).await;
        assert!(matches!(result, Err(PaymentsError::MissingBookingReference)));
    }

    #[tokio::test]
    async fn unknown_booking_is_reported() {
        let repo = FakeBookingRepository::default();
        let event = event(
            "checkout.completed",
            serde_json::json!({
                "id": "pay_1",
                "payment_status": "paid",
                "metadata": { "booking_id": "missing" },
            }),
        );

        let result = process_payment_webhook(event, "stripe", &repo).await;
        assert!(matches!(result, Err(PaymentsError::UnknownBooking(_))));
    }

    #[tokio::test]
    async fn refund_marks_paid_booking_refunded() {
        let repo = FakeBookingRepository::with_booking("b-1");
        repo.mark_paid("b-1", "stripe", "pay_1").await.unwrap();

        let event = event(
            "refund.completed",
            serde_json::json!({
                "id": "re_1",
                "metadata": { "booking_id": "b-1" },
            }),
        );
        process_payment_webhook(event, "stripe", &repo).await.unwrap();

        assert_eq!(
            repo.get("b-1").unwrap().payment_status,
            PaymentStatus::Refunded
        );
    }

    #[tokio::test]
    async fn unhandled_event_types_are_acknowledged() {
        let repo = FakeBookingRepository::with_booking("b-1");
        let event = event("customer.created", serde_json::json!({ "id": "cus_1" }));
        assert!(process_payment_webhook(event, "stripe", &repo).await.is_ok());
    }

    #[tokio::test]
    async fn repeated_paid_webhooks_are_idempotent() {
        let repo = FakeBookingRepository::with_booking("b-1");
        let make_event = || {
            event(
                "checkout.completed",
                serde_json::json!({
                    "id": "pay_1",
                    "payment_status": "paid",
                    "metadata": { "booking_id": "b-1" },
                }),
            )
        };

        process_payment_webhook(make_event(), "stripe", &repo).await.unwrap();
        let first = repo.get("b-1").unwrap();
        process_payment_webhook(make_event(), "stripe", &repo).await.unwrap();
        let second = repo.get("b-1").unwrap();

        assert_eq!(first.payment_status, second.payment_status);
        assert_eq!(first.payment_ref, second.payment_ref);
        assert_eq!(first.status, second.status);
    }
}
