//! # Store Ports
//!
//! The driven ports the rest of the core depends on: the transactional
//! marketplace store and the time source.
//!
//! Production deployments plug a persistent backend in behind
//! [`MarketplaceStore`]; the in-memory adapter in this crate is the
//! reference implementation and the one the test suites run against.

use serde_json::Value;
use shared_types::{
    CorrectionEntry, CorrectionTarget, Order, OrderId, Party, PartyId, RistourneId,
    RistourneRecord, RoyaltyId, RoyaltySale, SaleUnitRef, Timestamp, Work, WorkId,
};

use crate::errors::StoreError;
use crate::transaction::Transaction;

/// A record together with the version it was read at.
///
/// The version feeds the guard of the transaction that later writes the
/// record, which is what turns a read-compute-commit sequence into an
/// optimistically isolated unit.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The committed record.
    pub record: T,
    /// Monotonic per-record version.
    pub version: u64,
}

/// The transactional store abstraction.
pub trait MarketplaceStore: Send + Sync {
    /// Reads an order with its version.
    fn order(&self, id: &OrderId) -> Result<Option<Versioned<Order>>, StoreError>;

    /// Reads all orders.
    fn orders(&self) -> Result<Vec<Versioned<Order>>, StoreError>;

    /// Reads a work with its version.
    fn work(&self, id: &WorkId) -> Result<Option<Versioned<Work>>, StoreError>;

    /// Reads all works.
    fn works(&self) -> Result<Vec<Versioned<Work>>, StoreError>;

    /// Reads a party.
    fn party(&self, id: &PartyId) -> Result<Option<Party>, StoreError>;

    /// Reads a royalty record with its version.
    fn royalty(&self, id: &RoyaltyId) -> Result<Option<Versioned<RoyaltySale>>, StoreError>;

    /// Reads the royalty record for a sale unit, if accrued.
    fn royalty_for_unit(&self, unit: &SaleUnitRef) -> Result<Option<RoyaltySale>, StoreError>;

    /// Reads royalty records, optionally filtered by author and/or work.
    fn royalties(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<Vec<RoyaltySale>, StoreError>;

    /// Reads a ristourne record with its version.
    fn ristourne(&self, id: &RistourneId)
        -> Result<Option<Versioned<RistourneRecord>>, StoreError>;

    /// Reads the ristourne record of an order, if computed.
    fn ristourne_for_order(&self, order: &OrderId)
        -> Result<Option<RistourneRecord>, StoreError>;

    /// Reads ristourne records, optionally filtered by partner.
    fn ristournes(&self, partner: Option<PartyId>) -> Result<Vec<RistourneRecord>, StoreError>;

    /// Reads correction entries, optionally filtered by target.
    fn corrections(
        &self,
        target: Option<CorrectionTarget>,
    ) -> Result<Vec<CorrectionEntry>, StoreError>;

    /// Reads the current value and version of a correctable field.
    ///
    /// Used by the audit subsystem to capture the old value before pairing
    /// the correction entry with its patch.
    fn read_field(
        &self,
        target: &CorrectionTarget,
        field: &str,
    ) -> Result<(Value, u64), StoreError>;

    /// Commits a transaction atomically.
    ///
    /// Commits are serialized: guards are checked and writes applied under a
    /// single writer. Any failed guard or write rejects the whole batch.
    fn commit(&self, tx: Transaction) -> Result<(), StoreError>;
}

/// Abstract clock, so services are testable at fixed instants.
pub trait TimeSource: Send + Sync {
    /// Current Unix timestamp in seconds.
    fn now(&self) -> Timestamp;
}
