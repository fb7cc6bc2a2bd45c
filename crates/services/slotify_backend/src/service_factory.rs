// --- File: crates/services/slotify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides an implementation of the ServiceFactory trait for the
//! backend service. Services are initialized once at startup based on the
//! application configuration and runtime flags, then shared across routers.

use slotify_config::AppConfig;
use std::sync::Arc;

#[allow(unused_imports)]
use {
    slotify_common::is_feature_enabled,
    slotify_common::services::{
        BoxFuture, BoxedError, NotificationResult, NotificationService, ServiceFactory,
    },
    tracing::{error, info},
};

#[cfg(feature = "notify")]
use slotify_notify::NotifyService;

/// Service factory for the Slotify backend.
pub struct SlotifyServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "notify")]
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

#[cfg(feature = "notify")]
/// Wrapper converting the concrete notify service's error type into the
/// boxed error the trait-object seam expects.
struct BoxedNotifyService {
    inner: NotifyService,
}

#[cfg(feature = "notify")]
impl NotificationService for BoxedNotifyService {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.inner.send_email(to, subject, body, is_html);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn send_whatsapp(
        &self,
        to: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.inner.send_whatsapp(to, body);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

impl SlotifyServiceFactory {
    /// Create a new service factory.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "notify")]
            notification_service: None,
        };

        #[cfg(feature = "notify")]
        {
            if is_feature_enabled(&config, config.use_notify, config.notify.as_ref()) {
                info!("Initializing notification service...");
                match NotifyService::from_config(config.notify.as_ref().unwrap()) {
                    Ok(service) => {
                        factory.notification_service =
                            Some(Arc::new(BoxedNotifyService { inner: service }));
                    }
                    Err(e) => {
                        error!("Failed to initialize notification service: {}", e);
                    }
                }
            }
        }

        factory
    }
}

impl ServiceFactory for SlotifyServiceFactory {
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        #[cfg(feature = "notify")]
        {
            self.notification_service.clone()
        }
        #[cfg(not(feature = "notify"))]
        {
            None
        }
    }
}
