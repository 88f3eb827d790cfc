//! # cl-05-ristournes
//!
//! Ristourne Settlement Engine for Comptoir.
//!
//! ## Role in System
//!
//! - **Rebate Computation**: one [`shared_types::RistourneRecord`] per
//!   qualifying institutional order, weighted across line items by each
//!   work's book-type rate. The computation is pure; the orders subsystem
//!   commits it inside the transaction that made the order qualify.
//! - **Exactly Once**: qualification can happen on either ordering of the
//!   two trigger conditions (validation, full payment). Whichever side
//!   completes second computes the record, under a store guard asserting
//!   no record exists yet for the order.
//! - **Aggregation**: per-partner listings and totals are read-only.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::RistourneService;
