// --- File: crates/slotify_notify/src/email.rs ---
//! Outbound email delivery via the configured mail HTTP API.
//!
//! One JSON POST per message, bearer-authenticated with the key from the
//! `SLOTIFY_MAIL_API_KEY` env var. No retry or queueing; failures surface to
//! the caller, which decides whether delivery is best-effort.

use serde_json::json;
use slotify_common::services::NotificationResult;
use slotify_common::HTTP_CLIENT;
use tracing::info;

use crate::error::NotifyError;

#[derive(Debug, Clone)]
pub struct EmailSender {
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: Option<String>,
}

impl EmailSender {
    pub fn new(
        api_url: String,
        api_key: String,
        from_email: String,
        from_name: Option<String>,
    ) -> Self {
        Self {
            api_url,
            api_key,
            from_email,
            from_name,
        }
    }

    /// Send a single email. `is_html` selects the content type the provider
    /// renders.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<NotificationResult, NotifyError> {
        let content_type = if is_html { "text/html" } else { "text/plain" };
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": {
                "email": self.from_email,
                "name": self.from_name,
            },
            "subject": subject,
            "content": [{ "type": content_type, "value": body }],
        });

        info!("Sending email to {}: {}", to, subject);
        let resp = HTTP_CLIENT
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::error!("Mail API returned {}: {}", status, message);
            return Err(NotifyError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        // The mail API echoes a message id header; body is empty on success.
        let id = resp
            .headers()
            .get("X-Message-Id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(NotificationResult {
            id,
            status: "sent".to_string(),
        })
    }
}
