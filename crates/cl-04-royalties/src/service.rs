//! # Royalty Service
//!
//! Payout batches and read-only aggregates over royalty records.

use std::sync::Arc;

use cl_01_capabilities::{authorize, Capability};
use platform_store::{Guard, MarketplaceStore, StoreWrite, Transaction};
use shared_types::{
    Actor, Amount, BatchId, PartyId, RoyaltySale, SettlementStatus, WorkId,
};
use tracing::info;

use crate::domain::{PayoutWindow, RoyaltyError};

/// Read-only royalty totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoyaltySummary {
    /// Total accrued, paid or not.
    pub generated: Amount,
    /// Total already paid out.
    pub paid: Amount,
    /// Total awaiting payout.
    pub pending: Amount,
}

/// Payout and aggregation service.
pub struct RoyaltyService<S> {
    store: Arc<S>,
}

impl<S: MarketplaceStore> RoyaltyService<S> {
    /// Creates the service over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Marks every pending record accrued inside `window` as paid under
    /// `batch`.
    ///
    /// Returns the number of records newly paid. Idempotent: records
    /// already paid are not selected, so re-running a window pays nothing
    /// twice.
    pub fn settle_batch(
        &self,
        actor: &Actor,
        window: PayoutWindow,
        batch: BatchId,
    ) -> Result<usize, RoyaltyError> {
        authorize(actor.role, Capability::SettleRoyalties)
            .map_err(|_| RoyaltyError::Unauthorized)?;

        let selected: Vec<RoyaltySale> = self
            .store
            .royalties(None, None)?
            .into_iter()
            .filter(|s| s.status == SettlementStatus::Pending && window.contains(s.accrued_at))
            .collect();

        if selected.is_empty() {
            info!("[cl-04] payout window empty, nothing to settle");
            return Ok(0);
        }

        let mut tx = Transaction::new();
        for sale in &selected {
            let versioned = self.store.royalty(&sale.id)?.ok_or_else(|| {
                RoyaltyError::Store(platform_store::StoreError::UnknownEntity {
                    entity: format!("royalty {}", sale.id),
                })
            })?;
            let mut paid = versioned.record;
            paid.status = SettlementStatus::Paid;
            paid.batch = Some(batch);
            tx = tx
                .guard(Guard::RoyaltyVersion(paid.id, versioned.version))
                .write(StoreWrite::PutRoyalty(paid));
        }
        self.store.commit(tx)?;

        info!(
            "[cl-04] payout batch {} settled {} royalty record(s)",
            batch,
            selected.len()
        );
        Ok(selected.len())
    }

    /// Royalty records, optionally filtered by author and/or work.
    pub fn list(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<Vec<RoyaltySale>, RoyaltyError> {
        Ok(self.store.royalties(author, work)?)
    }

    /// Totals (generated / paid / pending) over the filtered records.
    ///
    /// A pure read reduction; whole-unit amounts sum without any rounding.
    pub fn summary(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<RoyaltySummary, RoyaltyError> {
        let mut summary = RoyaltySummary::default();
        for sale in self.store.royalties(author, work)? {
            summary.generated += sale.amount;
            match sale.status {
                SettlementStatus::Paid => summary.paid += sale.amount,
                SettlementStatus::Pending => summary.pending += sale.amount,
            }
        }
        Ok(summary)
    }
}
