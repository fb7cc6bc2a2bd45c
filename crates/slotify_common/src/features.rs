//! Feature flag handling for the Slotify application.
//!
//! This module provides utilities for working with feature flags in a more
//! maintainable way. It includes documentation on what each feature does and
//! helper functions for checking if features are enabled.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `booking`: Enables availability computation and booking endpoints
//! - `notify`: Enables email/WhatsApp notifications
//! - `payments`: Enables payment-provider webhook processing
//!
//! ## Usage
//!
//! Feature flags are used in two ways in the Slotify application:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! This module provides helper functions for checking if features are enabled
//! at runtime based on configuration values.

use slotify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the booking feature is enabled at runtime.
#[cfg(feature = "booking")]
pub fn is_booking_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_booking, config.booking.as_ref())
}

/// Check if the notification feature is enabled at runtime.
#[cfg(feature = "notify")]
pub fn is_notify_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_notify, config.notify.as_ref())
}

/// Check if the payments feature is enabled at runtime.
#[cfg(feature = "payments")]
pub fn is_payments_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_payments, config.payments.as_ref())
}
