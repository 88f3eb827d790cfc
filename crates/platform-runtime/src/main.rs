//! # Comptoir Platform Service
//!
//! Entry point for a standalone platform core: initializes telemetry,
//! loads configuration, wires the [`Platform`], and runs the payment
//! observation loop until shutdown. The dashboard/transport layer is an
//! external collaborator and mounts on top of the facade this process
//! exposes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use platform_runtime::{
    spawn_payment_poller, Platform, PlatformConfig, StaticPaymentGateway,
};
use platform_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(&TelemetryConfig::from_env())
        .context("failed to initialize telemetry")?;

    let config = load_config()?.with_env_overrides();
    let poll_interval = Duration::from_secs(config.payment_poll_seconds);

    let platform = Arc::new(Platform::in_memory(config));

    // The real gateway adapter is deployment-specific; the static adapter
    // keeps a fresh process runnable until one is plugged in.
    let gateway = Arc::new(StaticPaymentGateway::new());
    let poller = spawn_payment_poller(platform.clone(), gateway, poll_interval);

    info!("[runtime] platform ready, awaiting shutdown signal");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("[runtime] shutdown requested, stopping payment poller");
    poller.abort();
    Ok(())
}

/// Reads `COMPTOIR_CONFIG` as a JSON file path; defaults apply without it.
fn load_config() -> Result<PlatformConfig> {
    match std::env::var("COMPTOIR_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            PlatformConfig::from_json(&raw)
                .with_context(|| format!("failed to parse config file {path}"))
        }
        Err(_) => Ok(PlatformConfig::default()),
    }
}
