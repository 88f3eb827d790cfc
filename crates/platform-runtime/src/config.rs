//! # Platform Configuration
//!
//! Settlement rates and runtime knobs, loadable from JSON or overridden
//! per-variable from the environment.

use cl_05_ristournes::RistourneRateTable;
use serde::{Deserialize, Serialize};
use shared_types::RateBp;

/// Configuration of the platform core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Flat platform-wide royalty rate in basis points (default 15%).
    pub royalty_rate_bp: RateBp,
    /// Per-book-type ristourne rates.
    pub ristourne_rates: RistourneRateTable,
    /// Interval of the payment-gateway observation sweep, in seconds.
    pub payment_poll_seconds: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            royalty_rate_bp: cl_04_royalties::DEFAULT_ROYALTY_RATE_BP,
            ristourne_rates: RistourneRateTable::default(),
            payment_poll_seconds: 30,
        }
    }
}

impl PlatformConfig {
    /// Parses a JSON configuration document. Missing fields fall back to
    /// defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies environment overrides (`COMPTOIR_ROYALTY_RATE_BP`,
    /// `COMPTOIR_PAYMENT_POLL_SECONDS`) on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(rate) = env_u64("COMPTOIR_ROYALTY_RATE_BP") {
            self.royalty_rate_bp = rate as RateBp;
        }
        if let Some(secs) = env_u64("COMPTOIR_PAYMENT_POLL_SECONDS") {
            self.payment_poll_seconds = secs;
        }
        self
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}
