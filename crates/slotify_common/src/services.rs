// --- File: crates/slotify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for external services used by the
//! application. These traits allow for dependency injection and easier testing
//! by decoupling the application logic from specific implementations of
//! external delivery channels.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for notification service operations.
///
/// This trait defines the outbound channels the booking flow uses to notify
/// customers: templated email and WhatsApp messages. Implementations perform
/// a single delivery attempt; there is no retry or ordering coordination.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;

    /// Send a WhatsApp notification.
    fn send_whatsapp(&self, to: &str, body: &str)
        -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the services the
/// application needs at runtime.
pub trait ServiceFactory: Send + Sync {
    /// Get a notification service instance.
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>>;
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// The provider-side ID of the notification.
    pub id: String,
    /// The status of the notification.
    pub status: String,
}
