//! # cl-02-inventory
//!
//! Inventory Ledger subsystem for Comptoir.
//!
//! ## Role in System
//!
//! - **Stock Arithmetic**: pure reserve / confirm / release / restock
//!   operations over [`shared_types::StockLevel`], consumed by the order
//!   state machine inside its own transactions.
//! - **Wholesale Operations**: the ledger service exposes the
//!   stock-management operations of the wholesale-distribution manager
//!   (restocking, low-stock reporting).
//!
//! ## Invariants
//!
//! - `on_hand` never goes negative.
//! - `reserved` never exceeds `on_hand` and never double-counts: a unit is
//!   reserved exactly once between order creation and validation or
//!   cancellation.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::InventoryLedger;
