//! # cl-04-royalties
//!
//! Royalty Settlement Engine for Comptoir.
//!
//! ## Role in System
//!
//! - **Accrual**: one [`shared_types::RoyaltySale`] per confirmed sale
//!   unit, computed when the order state machine validates an order. The
//!   accrual functions here are pure; the orders subsystem commits their
//!   output inside the validation transaction, so a failed accrual rejects
//!   the whole transition.
//! - **Payout**: a periodic batch marks pending records paid. Re-running a
//!   window is a no-op because paid records are no longer selected.
//! - **Aggregation**: totals per author/work are pure read reductions and
//!   never mutate state.

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::{RoyaltyService, RoyaltySummary};
