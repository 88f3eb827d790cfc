//! # platform-store
//!
//! The shared transactional store for the Comptoir core.
//!
//! ## Role in System
//!
//! - **Single Persistence Boundary**: every mutating operation in the order,
//!   inventory, settlement, and audit subsystems is expressed as a
//!   [`Transaction`] committed through the [`MarketplaceStore`] port.
//! - **Optimistic Isolation**: a transaction carries version guards for every
//!   record it read; commits are serialized, so two concurrent writers to the
//!   same record cannot both succeed — the loser fails with
//!   [`StoreError::VersionConflict`].
//! - **Idempotent Appends**: settlement records are keyed by natural keys
//!   (sale unit, order id); a duplicate append fails with
//!   [`StoreError::DuplicateRecord`] instead of double-settling.
//!
//! ## Atomicity Guarantee
//!
//! Either ALL guards hold and ALL writes apply, or NONE do. A failed
//! settlement write therefore rolls back the status write committed with it.

pub mod adapters;
pub mod errors;
pub mod patch;
pub mod ports;
pub mod transaction;

pub use adapters::{FixedTimeSource, InMemoryStore, SystemTimeSource};
pub use errors::StoreError;
pub use ports::{MarketplaceStore, TimeSource, Versioned};
pub use transaction::{Guard, StoreWrite, Transaction};
