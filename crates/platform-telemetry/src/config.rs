//! Telemetry configuration, derived from the environment.

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name stamped on log lines.
    pub service_name: String,
    /// Default level filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// JSON output for containerized deployments.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "comptoir".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: std::env::var("COMPTOIR_SERVICE_NAME")
                .unwrap_or(defaults.service_name),
            log_level: std::env::var("COMPTOIR_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: std::env::var("COMPTOIR_LOG_JSON").is_ok(),
        }
    }
}
