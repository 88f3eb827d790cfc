//! # Order Events
//!
//! Every mutation returns the events it produced alongside the updated
//! order. The runtime logs them and hands them to the (external)
//! notification layer; nothing in the core awaits a consumer.

use shared_types::{Amount, Order, OrderId, OrderStatus, PaymentStatus, WorkId};

/// Something observable that happened inside an order transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// An order was created and its stock reserved.
    Created { order: OrderId, total: Amount },
    /// The order moved along an edge of the transition table.
    StatusChanged {
        order: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// Reserved units became a permanent decrement (validation).
    StockConfirmed { work: WorkId, quantity: u32 },
    /// Reserved units returned to the pool (pending order cancelled).
    StockReleased { work: WorkId, quantity: u32 },
    /// Confirmed units returned to stock (validated order cancelled).
    StockReturned { work: WorkId, quantity: u32 },
    /// A work fell to or below its minimum-stock threshold.
    LowStock {
        work: WorkId,
        on_hand: u32,
        min_stock: u32,
    },
    /// Royalty records were accrued for the order's authored units.
    RoyaltiesAccrued {
        order: OrderId,
        records: usize,
        total: Amount,
    },
    /// The order's single ristourne record was computed.
    RistourneComputed { order: OrderId, amount: Amount },
    /// The payment collaborator reported a new settlement state.
    PaymentRecorded {
        order: OrderId,
        status: PaymentStatus,
    },
}

/// Result of a successful order mutation.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The order as committed.
    pub order: Order,
    /// Events produced inside the same transaction.
    pub events: Vec<OrderEvent>,
}
