//! # Platform Telemetry
//!
//! Structured logging for the Comptoir core.
//!
//! Subsystems emit `tracing` events with a `[cl-NN]` prefix; this crate
//! owns the subscriber setup so every binary and test harness initializes
//! logging the same way.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COMPTOIR_LOG_LEVEL` | `info` | Log level filter |
//! | `COMPTOIR_LOG_JSON` | unset | Any value switches to JSON output |
//! | `COMPTOIR_SERVICE_NAME` | `comptoir` | Service name in log lines |

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log-level filter did not parse.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Guard that keeps telemetry active. Drop to flush and shut down.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("{} telemetry shutting down", self.service_name);
    }
}

/// Initializes the global tracing subscriber.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    tracing::info!("{} telemetry initialized", config.service_name);
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}
