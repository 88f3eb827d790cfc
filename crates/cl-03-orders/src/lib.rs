//! # cl-03-orders
//!
//! Order State Machine subsystem for Comptoir.
//!
//! ## Role in System
//!
//! - **Owns Order Status**: the canonical transition table in
//!   [`domain::transitions`] is the single source of truth for which edges
//!   exist, which capability each edge requires, and what each status is
//!   called. Authorization and dashboard labeling both read it; they cannot
//!   diverge.
//! - **Transition Orchestration**: every transition commits its status
//!   write together with its dependent effects (stock confirmation or
//!   release, royalty accrual, ristourne computation) as one guarded store
//!   transaction. A failing settlement rejects the whole transition.
//! - **Optimistic Concurrency**: transitions are guarded by the order's
//!   version. Of two concurrent attempts on the same order, exactly one
//!   commits; the other fails with `StaleState` and may re-read and retry.
//!
//! ## State Machine
//!
//! ```text
//! [Pending] ──validate──→ [Validated] ──process──→ [Processing]
//!     │                       │                         │
//!     └──cancel (buyer/exec)  └──cancel (exec only)     └──ship──→ [Shipped]
//!                 │                   │                                │
//!                 ↓                   ↓                                └──deliver──→ [Delivered]
//!            [Cancelled]         [Cancelled]
//! ```

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::OrderLifecycleService;
