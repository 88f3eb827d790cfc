//! # Transactions
//!
//! A [`Transaction`] is the unit of mutation: a list of guards that must all
//! hold, plus a list of writes that then all apply. Subsystems build one per
//! operation and hand it to [`crate::MarketplaceStore::commit`].

use serde_json::Value;
use shared_types::{
    CorrectionEntry, CorrectionTarget, Order, OrderId, Party, RistourneId, RistourneRecord,
    RoyaltyId, RoyaltySale, SaleUnitRef, Work, WorkId,
};

/// A precondition checked before any write applies.
#[derive(Debug, Clone)]
pub enum Guard {
    /// The order must still be at this version.
    OrderVersion(OrderId, u64),
    /// The work must still be at this version.
    WorkVersion(WorkId, u64),
    /// The royalty record must still be at this version.
    RoyaltyVersion(RoyaltyId, u64),
    /// The ristourne record must still be at this version.
    RistourneVersion(RistourneId, u64),
    /// No ristourne may exist yet for this order (exactly-once trigger).
    RistourneAbsent(OrderId),
    /// No royalty may exist yet for this sale unit (exactly-once accrual).
    SaleUnitAbsent(SaleUnitRef),
}

/// A single write inside a transaction.
#[derive(Debug, Clone)]
pub enum StoreWrite {
    /// Insert or replace an order.
    PutOrder(Order),
    /// Insert or replace a work.
    PutWork(Work),
    /// Insert or replace a party.
    PutParty(Party),
    /// Append a new royalty record; fails on an existing sale-unit key.
    AppendRoyalty(RoyaltySale),
    /// Replace an existing royalty record (payout marking).
    PutRoyalty(RoyaltySale),
    /// Append a new ristourne record; fails on an existing order key.
    AppendRistourne(RistourneRecord),
    /// Replace an existing ristourne record.
    PutRistourne(RistourneRecord),
    /// Append a correction entry. Corrections are append-only: there is no
    /// write variant that can modify or remove one.
    AppendCorrection(CorrectionEntry),
    /// Apply a whitelisted field change to a target record.
    PatchField {
        /// Record being patched.
        target: CorrectionTarget,
        /// Serde field name.
        field: String,
        /// New value.
        value: Value,
    },
}

/// An atomic batch of guards and writes.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    /// Preconditions; all must hold.
    pub guards: Vec<Guard>,
    /// Writes; all apply or none do.
    pub writes: Vec<StoreWrite>,
}

impl Transaction {
    /// Creates an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Adds a write.
    pub fn write(mut self, write: StoreWrite) -> Self {
        self.writes.push(write);
        self
    }

    /// True when the transaction carries no writes.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
