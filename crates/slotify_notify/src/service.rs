// --- File: crates/slotify_notify/src/service.rs ---
//! Notification service implementation backed by the email and WhatsApp
//! senders, behind the `NotificationService` trait for dependency injection.

use slotify_common::services::{BoxFuture, NotificationResult, NotificationService};
use slotify_config::NotifyConfig;

use crate::email::EmailSender;
use crate::error::NotifyError;
use crate::whatsapp::WhatsAppSender;

/// Notification service combining the configured delivery channels.
pub struct NotifyService {
    email: EmailSender,
    whatsapp: WhatsAppSender,
}

impl NotifyService {
    /// Build the service from config; secrets come from env vars
    /// (`SLOTIFY_MAIL_API_KEY`, `TWILIO_AUTH_TOKEN`).
    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let mail_api_key =
            std::env::var("SLOTIFY_MAIL_API_KEY").map_err(|_| NotifyError::ConfigError)?;
        let twilio_auth_token =
            std::env::var("TWILIO_AUTH_TOKEN").map_err(|_| NotifyError::ConfigError)?;

        Ok(Self {
            email: EmailSender::new(
                config.mail_api_url.clone(),
                mail_api_key,
                config.from_email.clone(),
                config.from_name.clone(),
            ),
            whatsapp: WhatsAppSender::new(
                config.twilio_account_sid.clone(),
                twilio_auth_token,
                config.whatsapp_from.clone(),
            ),
        })
    }

    pub fn new(email: EmailSender, whatsapp: WhatsAppSender) -> Self {
        Self { email, whatsapp }
    }
}

impl NotificationService for NotifyService {
    type Error = NotifyError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        Box::pin(async move { self.email.send(&to, &subject, &body, is_html).await })
    }

    fn send_whatsapp(
        &self,
        to: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let to = to.to_string();
        let body = body.to_string();

        Box::pin(async move { self.whatsapp.send(&to, &body).await })
    }
}
