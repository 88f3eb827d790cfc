//! # In-Memory Store
//!
//! Reference implementation of [`MarketplaceStore`] backed by `RwLock`ed
//! maps with per-record version counters.
//!
//! Commits take the write lock for their whole duration, which serializes
//! them; a transaction is first applied to a scratch copy of the state and
//! only swapped in when every guard and write succeeded, so a failing write
//! can never leave a half-applied batch behind.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use shared_types::{
    CorrectionEntry, CorrectionTarget, Order, OrderId, Party, PartyId, RistourneId,
    RistourneRecord, RoyaltyId, RoyaltySale, SaleUnitRef, Work, WorkId,
};
use tracing::debug;

use crate::errors::StoreError;
use crate::patch;
use crate::ports::{MarketplaceStore, Versioned};
use crate::transaction::{Guard, StoreWrite, Transaction};

#[derive(Debug, Clone, Default)]
struct StoreState {
    orders: HashMap<OrderId, (Order, u64)>,
    works: HashMap<WorkId, (Work, u64)>,
    parties: HashMap<PartyId, Party>,
    royalties: HashMap<RoyaltyId, (RoyaltySale, u64)>,
    royalty_units: HashMap<SaleUnitRef, RoyaltyId>,
    ristournes: HashMap<RistourneId, (RistourneRecord, u64)>,
    ristourne_orders: HashMap<OrderId, RistourneId>,
    corrections: Vec<CorrectionEntry>,
}

impl StoreState {
    fn check_guard(&self, guard: &Guard) -> Result<(), StoreError> {
        match guard {
            Guard::OrderVersion(id, expected) => {
                let (_, found) = self.orders.get(id).ok_or_else(|| StoreError::UnknownEntity {
                    entity: format!("order {id}"),
                })?;
                versions_match(&format!("order {id}"), *expected, *found)
            }
            Guard::WorkVersion(id, expected) => {
                let (_, found) = self.works.get(id).ok_or_else(|| StoreError::UnknownEntity {
                    entity: format!("work {id}"),
                })?;
                versions_match(&format!("work {id}"), *expected, *found)
            }
            Guard::RoyaltyVersion(id, expected) => {
                let (_, found) =
                    self.royalties
                        .get(id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("royalty {id}"),
                        })?;
                versions_match(&format!("royalty {id}"), *expected, *found)
            }
            Guard::RistourneVersion(id, expected) => {
                let (_, found) =
                    self.ristournes
                        .get(id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("ristourne {id}"),
                        })?;
                versions_match(&format!("ristourne {id}"), *expected, *found)
            }
            Guard::RistourneAbsent(order) => {
                if self.ristourne_orders.contains_key(order) {
                    Err(StoreError::DuplicateRecord {
                        key: format!("ristourne for order {order}"),
                    })
                } else {
                    Ok(())
                }
            }
            Guard::SaleUnitAbsent(unit) => {
                if self.royalty_units.contains_key(unit) {
                    Err(StoreError::DuplicateRecord {
                        key: format!("royalty for sale unit {unit}"),
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    fn apply(&mut self, write: StoreWrite) -> Result<(), StoreError> {
        match write {
            StoreWrite::PutOrder(order) => {
                let next = self.orders.get(&order.id).map(|(_, v)| v + 1).unwrap_or(1);
                self.orders.insert(order.id, (order, next));
                Ok(())
            }
            StoreWrite::PutWork(work) => {
                let next = self.works.get(&work.id).map(|(_, v)| v + 1).unwrap_or(1);
                self.works.insert(work.id, (work, next));
                Ok(())
            }
            StoreWrite::PutParty(party) => {
                self.parties.insert(party.id, party);
                Ok(())
            }
            StoreWrite::AppendRoyalty(sale) => {
                if self.royalty_units.contains_key(&sale.unit) {
                    return Err(StoreError::DuplicateRecord {
                        key: format!("royalty for sale unit {}", sale.unit),
                    });
                }
                self.royalty_units.insert(sale.unit, sale.id);
                self.royalties.insert(sale.id, (sale, 1));
                Ok(())
            }
            StoreWrite::PutRoyalty(sale) => {
                let next = match self.royalties.get(&sale.id) {
                    Some((_, v)) => v + 1,
                    None => {
                        return Err(StoreError::UnknownEntity {
                            entity: format!("royalty {}", sale.id),
                        })
                    }
                };
                self.royalties.insert(sale.id, (sale, next));
                Ok(())
            }
            StoreWrite::AppendRistourne(record) => {
                if self.ristourne_orders.contains_key(&record.order) {
                    return Err(StoreError::DuplicateRecord {
                        key: format!("ristourne for order {}", record.order),
                    });
                }
                self.ristourne_orders.insert(record.order, record.id);
                self.ristournes.insert(record.id, (record, 1));
                Ok(())
            }
            StoreWrite::PutRistourne(record) => {
                let next = match self.ristournes.get(&record.id) {
                    Some((_, v)) => v + 1,
                    None => {
                        return Err(StoreError::UnknownEntity {
                            entity: format!("ristourne {}", record.id),
                        })
                    }
                };
                self.ristournes.insert(record.id, (record, next));
                Ok(())
            }
            StoreWrite::AppendCorrection(entry) => {
                self.corrections.push(entry);
                Ok(())
            }
            StoreWrite::PatchField {
                target,
                field,
                value,
            } => self.apply_patch(target, &field, &value),
        }
    }

    fn apply_patch(
        &mut self,
        target: CorrectionTarget,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        match target {
            CorrectionTarget::Order(id) => {
                let (order, version) =
                    self.orders
                        .get_mut(&id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("order {id}"),
                        })?;
                patch::patch_order_field(order, field, value)?;
                *version += 1;
                Ok(())
            }
            CorrectionTarget::Work(id) => {
                let (work, version) =
                    self.works
                        .get_mut(&id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("work {id}"),
                        })?;
                patch::patch_work_field(work, field, value)?;
                *version += 1;
                Ok(())
            }
            CorrectionTarget::Royalty(id) => {
                let (sale, version) =
                    self.royalties
                        .get_mut(&id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("royalty {id}"),
                        })?;
                patch::patch_royalty_field(sale, field, value)?;
                *version += 1;
                Ok(())
            }
            CorrectionTarget::Ristourne(id) => {
                let (record, version) =
                    self.ristournes
                        .get_mut(&id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("ristourne {id}"),
                        })?;
                patch::patch_ristourne_field(record, field, value)?;
                *version += 1;
                Ok(())
            }
        }
    }
}

fn versions_match(entity: &str, expected: u64, found: u64) -> Result<(), StoreError> {
    if expected == found {
        Ok(())
    } else {
        Err(StoreError::VersionConflict {
            entity: entity.to_string(),
            expected,
            found,
        })
    }
}

/// In-memory implementation of [`MarketplaceStore`].
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarketplaceStore for InMemoryStore {
    fn order(&self, id: &OrderId) -> Result<Option<Versioned<Order>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.orders.get(id).map(|(o, v)| Versioned {
            record: o.clone(),
            version: *v,
        }))
    }

    fn orders(&self) -> Result<Vec<Versioned<Order>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .orders
            .values()
            .map(|(o, v)| Versioned {
                record: o.clone(),
                version: *v,
            })
            .collect())
    }

    fn work(&self, id: &WorkId) -> Result<Option<Versioned<Work>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.works.get(id).map(|(w, v)| Versioned {
            record: w.clone(),
            version: *v,
        }))
    }

    fn works(&self) -> Result<Vec<Versioned<Work>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .works
            .values()
            .map(|(w, v)| Versioned {
                record: w.clone(),
                version: *v,
            })
            .collect())
    }

    fn party(&self, id: &PartyId) -> Result<Option<Party>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.parties.get(id).cloned())
    }

    fn royalty(&self, id: &RoyaltyId) -> Result<Option<Versioned<RoyaltySale>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.royalties.get(id).map(|(s, v)| Versioned {
            record: s.clone(),
            version: *v,
        }))
    }

    fn royalty_for_unit(&self, unit: &SaleUnitRef) -> Result<Option<RoyaltySale>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .royalty_units
            .get(unit)
            .and_then(|id| state.royalties.get(id))
            .map(|(s, _)| s.clone()))
    }

    fn royalties(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<Vec<RoyaltySale>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .royalties
            .values()
            .map(|(s, _)| s)
            .filter(|s| author.map_or(true, |a| s.author == a))
            .filter(|s| work.map_or(true, |w| s.work == w))
            .cloned()
            .collect())
    }

    fn ristourne(
        &self,
        id: &RistourneId,
    ) -> Result<Option<Versioned<RistourneRecord>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.ristournes.get(id).map(|(r, v)| Versioned {
            record: r.clone(),
            version: *v,
        }))
    }

    fn ristourne_for_order(
        &self,
        order: &OrderId,
    ) -> Result<Option<RistourneRecord>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .ristourne_orders
            .get(order)
            .and_then(|id| state.ristournes.get(id))
            .map(|(r, _)| r.clone()))
    }

    fn ristournes(&self, partner: Option<PartyId>) -> Result<Vec<RistourneRecord>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .ristournes
            .values()
            .map(|(r, _)| r)
            .filter(|r| partner.map_or(true, |p| r.partner == p))
            .cloned()
            .collect())
    }

    fn corrections(
        &self,
        target: Option<CorrectionTarget>,
    ) -> Result<Vec<CorrectionEntry>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state
            .corrections
            .iter()
            .filter(|c| target.map_or(true, |t| c.target == t))
            .cloned()
            .collect())
    }

    fn read_field(
        &self,
        target: &CorrectionTarget,
        field: &str,
    ) -> Result<(Value, u64), StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        match target {
            CorrectionTarget::Order(id) => {
                let (order, version) =
                    state.orders.get(id).ok_or_else(|| StoreError::UnknownEntity {
                        entity: format!("order {id}"),
                    })?;
                Ok((patch::read_order_field(order, field)?, *version))
            }
            CorrectionTarget::Work(id) => {
                let (work, version) =
                    state.works.get(id).ok_or_else(|| StoreError::UnknownEntity {
                        entity: format!("work {id}"),
                    })?;
                Ok((patch::read_work_field(work, field)?, *version))
            }
            CorrectionTarget::Royalty(id) => {
                let (sale, version) =
                    state
                        .royalties
                        .get(id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("royalty {id}"),
                        })?;
                Ok((patch::read_royalty_field(sale, field)?, *version))
            }
            CorrectionTarget::Ristourne(id) => {
                let (record, version) =
                    state
                        .ristournes
                        .get(id)
                        .ok_or_else(|| StoreError::UnknownEntity {
                            entity: format!("ristourne {id}"),
                        })?;
                Ok((patch::read_ristourne_field(record, field)?, *version))
            }
        }
    }

    fn commit(&self, tx: Transaction) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        for guard in &tx.guards {
            state.check_guard(guard)?;
        }

        // Apply to a scratch copy so a failing write rolls the batch back.
        let mut next = state.clone();
        let write_count = tx.writes.len();
        for write in tx.writes {
            next.apply(write)?;
        }

        *state = next;
        debug!(writes = write_count, "store commit applied");
        Ok(())
    }
}
