// --- File: crates/slotify_config/src/lib.rs ---
//! Unified runtime configuration for Slotify.
//!
//! Configuration is layered: `config/default.toml`, an optional
//! `config/{RUN_ENV}.toml` overlay, then `SLOTIFY__`-prefixed environment
//! variables (double underscore as section separator, e.g.
//! `SLOTIFY__SERVER__PORT=8086`). Secrets are never placed in config files;
//! they are read from plain env vars by the crates that need them.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;

pub mod models;
pub use models::{
    AppConfig, BookingConfig, DatabaseConfig, NotifyConfig, PaymentsConfig, ServerConfig,
};

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` into the process environment exactly once.
/// Dependent crates call this so tests and binaries behave the same.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        // A missing .env file is fine; env vars may come from the environment.
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
///
/// The caller owns the returned value and decides its scope; nothing here is
/// cached process-wide. The backend loads once at startup and hands
/// `Arc<AppConfig>` to each router.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "default".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(
            Environment::with_prefix("SLOTIFY")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "127.0.0.1", "port": 8086 } }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8086);
        assert!(!config.use_booking);
        assert!(config.booking.is_none());
    }

    #[test]
    fn deserializes_feature_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "server": { "host": "0.0.0.0", "port": 8080 },
                "use_booking": true,
                "booking": { "default_buffer_minutes": 15, "min_advance_minutes": 120 },
                "use_payments": true,
                "payments": { "provider": "stripe", "timestamp_tolerance_secs": 600 }
            }"#,
        )
        .unwrap();
        assert!(config.use_booking);
        let booking = config.booking.unwrap();
        assert_eq!(booking.default_buffer_minutes, 15);
        assert_eq!(booking.min_advance_minutes, Some(120));
        assert_eq!(config.payments.unwrap().provider, "stripe");
    }
}
