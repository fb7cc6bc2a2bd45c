// --- File: crates/slotify_notify/src/whatsapp.rs ---
//! Outbound WhatsApp delivery via the Twilio Messages API.
//!
//! Twilio routes WhatsApp traffic through the same Messages endpoint as SMS;
//! addresses carry a `whatsapp:` prefix. Auth token comes from the
//! `TWILIO_AUTH_TOKEN` env var.

use serde::Deserialize;
use slotify_common::services::NotificationResult;
use slotify_common::HTTP_CLIENT;
use tracing::info;

use crate::error::NotifyError;

#[derive(Debug, Clone)]
pub struct WhatsAppSender {
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize, Debug)]
struct TwilioMessageResponse {
    sid: String,
    status: String,
}

impl WhatsAppSender {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
        }
    }

    /// Send a single WhatsApp message. `to` is an E.164 number without the
    /// `whatsapp:` prefix.
    pub async fn send(&self, to: &str, body: &str) -> Result<NotificationResult, NotifyError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let to_addr = format!("whatsapp:{}", to);
        let from_addr = format!("whatsapp:{}", self.from_number);
        let params = [
            ("To", to_addr.as_str()),
            ("From", from_addr.as_str()),
            ("Body", body),
        ];

        info!("Sending WhatsApp message to {}", to);
        let resp = HTTP_CLIENT
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            // Bubble up the Twilio JSON error so you can debug
            tracing::error!("Twilio returned {}: {}", status, message);
            return Err(NotifyError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let message: TwilioMessageResponse = serde_json::from_str(&resp.text().await?)?;
        Ok(NotificationResult {
            id: message.sid,
            status: message.status,
        })
    }
}
