//! # Ristourne Service
//!
//! Read-only access to rebate records. Record creation happens inside
//! order transactions owned by the orders subsystem; payment-status fixes
//! on existing records go through the correction audit log.

use std::sync::Arc;

use platform_store::MarketplaceStore;
use shared_types::{Amount, OrderId, PartyId, RistourneRecord};

use crate::domain::RistourneError;

/// Per-partner rebate reads.
pub struct RistourneService<S> {
    store: Arc<S>,
}

impl<S: MarketplaceStore> RistourneService<S> {
    /// Creates the service over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Rebate records, optionally filtered by partner.
    pub fn list(&self, partner: Option<PartyId>) -> Result<Vec<RistourneRecord>, RistourneError> {
        Ok(self.store.ristournes(partner)?)
    }

    /// The rebate record of one order, if computed.
    pub fn for_order(&self, order: &OrderId) -> Result<Option<RistourneRecord>, RistourneError> {
        Ok(self.store.ristourne_for_order(order)?)
    }

    /// Total rebate accrued by a partner.
    pub fn total_for(&self, partner: PartyId) -> Result<Amount, RistourneError> {
        Ok(self
            .store
            .ristournes(Some(partner))?
            .iter()
            .map(|r| r.amount)
            .sum())
    }
}
