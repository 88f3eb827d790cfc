//! # Order Lifecycle Service
//!
//! Orchestrates order creation, transitions, and payment observation over
//! the store and time ports. Each operation is a stateless unit of work:
//! read, compute, commit one guarded transaction.

mod create;
mod transition;


use std::collections::HashMap;
use std::sync::Arc;

use cl_05_ristournes::RistourneRateTable;
use platform_store::{MarketplaceStore, TimeSource, Versioned};
use shared_types::{Order, OrderId, Party, PartyId, RateBp, Work, WorkId};

use crate::domain::OrderError;

/// The order state machine service.
///
/// Generic over the store and clock so the whole lifecycle is testable
/// against the in-memory adapter at fixed instants.
pub struct OrderLifecycleService<S, T> {
    store: Arc<S>,
    time: Arc<T>,
    royalty_rate_bp: RateBp,
    ristourne_rates: RistourneRateTable,
}

impl<S: MarketplaceStore, T: TimeSource> OrderLifecycleService<S, T> {
    /// Creates the service.
    pub fn new(
        store: Arc<S>,
        time: Arc<T>,
        royalty_rate_bp: RateBp,
        ristourne_rates: RistourneRateTable,
    ) -> Self {
        Self {
            store,
            time,
            royalty_rate_bp,
            ristourne_rates,
        }
    }

    /// Reads an order with its version.
    fn load_order(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.store
            .order(&id)?
            .ok_or(OrderError::UnknownOrder { order: id })
    }

    /// Reads a party.
    fn load_party(&self, id: PartyId) -> Result<Party, OrderError> {
        self.store
            .party(&id)?
            .ok_or(OrderError::UnknownParty { party: id })
    }

    /// Reads every distinct work referenced by an order, with versions.
    fn load_line_works(
        &self,
        order: &Order,
    ) -> Result<HashMap<WorkId, Versioned<Work>>, OrderError> {
        let mut works = HashMap::new();
        for line in &order.lines {
            if works.contains_key(&line.work) {
                continue;
            }
            let versioned = self
                .store
                .work(&line.work)?
                .ok_or(OrderError::UnknownWork { work: line.work })?;
            works.insert(line.work, versioned);
        }
        Ok(works)
    }

    /// Drops versions for the pure settlement computations.
    fn plain_works(works: &HashMap<WorkId, Versioned<Work>>) -> HashMap<WorkId, Work> {
        works
            .iter()
            .map(|(id, v)| (*id, v.record.clone()))
            .collect()
    }
}
