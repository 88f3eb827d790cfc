//! # Payment Observation Sweep
//!
//! Periodically reads the payment gateway and applies the observed states
//! as status flags through `record_payment`. The gateway is only ever
//! awaited out here, never inside a store transaction.

use std::sync::Arc;
use std::time::Duration;

use platform_store::{MarketplaceStore, TimeSource};
use shared_types::{OrderStatus, PaymentStatus};
use tracing::{debug, info, warn};

use crate::gateway::PaymentGateway;
use crate::{Platform, RuntimeError};

/// One observation sweep: reconciles every open order's payment flag with
/// the gateway. Returns the number of orders whose flag changed.
///
/// Individual failures (gateway hiccups, lost transition races) are logged
/// and retried on the next sweep; one bad order never stalls the rest.
pub async fn sweep_payments<S, T, G>(
    platform: &Platform<S, T>,
    gateway: &G,
) -> Result<usize, RuntimeError>
where
    S: MarketplaceStore,
    T: TimeSource,
    G: PaymentGateway + ?Sized,
{
    let mut updated = 0;
    for order in platform.orders()? {
        if order.status == OrderStatus::Cancelled || order.payment == PaymentStatus::Settled {
            continue;
        }
        let observed = match gateway.payment_status(&order.id).await {
            Ok(status) => status,
            Err(e) => {
                warn!("[runtime] gateway read failed for order {}: {}", order.id, e);
                continue;
            }
        };
        if observed == order.payment {
            continue;
        }
        match platform.record_payment(order.id, observed) {
            Ok(_) => updated += 1,
            Err(e) => {
                // StaleState in particular: another actor moved the order
                // mid-sweep. The next sweep re-reads and settles it.
                warn!(
                    "[runtime] payment update for order {} deferred: {}",
                    order.id, e
                );
            }
        }
    }
    debug!("[runtime] payment sweep updated {} order(s)", updated);
    Ok(updated)
}

/// Spawns the periodic observation loop.
pub fn spawn_payment_poller<S, T>(
    platform: Arc<Platform<S, T>>,
    gateway: Arc<dyn PaymentGateway>,
    interval: Duration,
) -> tokio::task::JoinHandle<()>
where
    S: MarketplaceStore + 'static,
    T: TimeSource + 'static,
{
    info!(
        "[runtime] payment poller started (every {:?})",
        interval
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_payments(platform.as_ref(), gateway.as_ref()).await {
                warn!("[runtime] payment sweep failed: {}", e);
            }
        }
    })
}
