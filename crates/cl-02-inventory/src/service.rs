//! # Inventory Ledger Service
//!
//! The stock-management operations of the wholesale-distribution manager.
//! Reservation, confirmation, and release are not exposed here: they only
//! ever run inside an order transition transaction, owned by the orders
//! subsystem.

use std::sync::Arc;

use cl_01_capabilities::{authorize, Capability};
use platform_store::{Guard, MarketplaceStore, StoreError, StoreWrite, Transaction};
use shared_types::{Actor, Work, WorkId};
use tracing::{info, warn};

use crate::domain::{self, InventoryError};

/// Bounded retry for write contention on a single work. Contention here is
/// ordinary (several clerks restocking at once), so the ledger retries the
/// read-compute-commit loop instead of surfacing every conflict.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Stock-management service.
pub struct InventoryLedger<S> {
    store: Arc<S>,
}

impl<S: MarketplaceStore> InventoryLedger<S> {
    /// Creates the ledger over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Adds `quantity` units to a work's physical stock.
    ///
    /// Requires the `ManageStock` capability.
    pub fn restock(
        &self,
        actor: &Actor,
        work_id: WorkId,
        quantity: u32,
    ) -> Result<Work, InventoryError> {
        authorize(actor.role, Capability::ManageStock)
            .map_err(|_| InventoryError::Unauthorized)?;

        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let versioned = self
                .store
                .work(&work_id)?
                .ok_or(InventoryError::UnknownWork { work: work_id })?;

            let mut work = versioned.record;
            work.stock = domain::restock(work.stock, quantity);

            let tx = Transaction::new()
                .guard(Guard::WorkVersion(work_id, versioned.version))
                .write(StoreWrite::PutWork(work.clone()));

            match self.store.commit(tx) {
                Ok(()) => {
                    info!(
                        "[cl-02] restocked work {} (+{}), on hand {}",
                        work_id, quantity, work.stock.on_hand
                    );
                    return Ok(work);
                }
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        warn!("[cl-02] restock contention on work {}", work_id);
        Err(InventoryError::Contention { work: work_id })
    }

    /// Units still available for reservation on a work.
    pub fn available(&self, work_id: &WorkId) -> Result<u32, InventoryError> {
        let versioned = self
            .store
            .work(work_id)?
            .ok_or(InventoryError::UnknownWork { work: *work_id })?;
        Ok(versioned.record.stock.available())
    }

    /// Works at or below their minimum-stock threshold.
    pub fn low_stock_report(&self) -> Result<Vec<Work>, InventoryError> {
        let mut low: Vec<Work> = self
            .store
            .works()?
            .into_iter()
            .map(|v| v.record)
            .filter(domain::is_low)
            .collect();
        low.sort_by_key(|w| w.stock.on_hand);
        Ok(low)
    }
}
