//! # Canonical Transition Table
//!
//! The one place where the order lifecycle is defined. Every entry names a
//! legal edge and the authority it requires; anything not listed here is an
//! `InvalidTransition`, whoever asks.

use cl_01_capabilities::Capability;
use shared_types::OrderStatus;

/// Authority required to take an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAuth {
    /// The acting role must hold this capability.
    Capability(Capability),
    /// Either the actor owns the order and holds `owner`, or the actor
    /// holds `override_cap` (the executive escape hatch).
    OwnerOrOverride {
        /// Capability sufficient for the order's own buyer.
        owner: Capability,
        /// Capability that bypasses the ownership requirement.
        override_cap: Capability,
    },
}

/// One legal edge of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRule {
    /// Source status.
    pub from: OrderStatus,
    /// Target status.
    pub to: OrderStatus,
    /// Authority required to take the edge.
    pub auth: EdgeAuth,
}

/// The complete transition table.
///
/// Forward edges never skip a state; cancellation is reachable only from
/// `Pending` (buyer-own or executive) and `Validated` (executive only).
pub const TRANSITIONS: &[EdgeRule] = &[
    EdgeRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Validated,
        auth: EdgeAuth::Capability(Capability::ValidateOrder),
    },
    EdgeRule {
        from: OrderStatus::Validated,
        to: OrderStatus::Processing,
        auth: EdgeAuth::Capability(Capability::BeginProcessing),
    },
    EdgeRule {
        from: OrderStatus::Processing,
        to: OrderStatus::Shipped,
        auth: EdgeAuth::Capability(Capability::ShipOrder),
    },
    EdgeRule {
        from: OrderStatus::Shipped,
        to: OrderStatus::Delivered,
        auth: EdgeAuth::Capability(Capability::ConfirmDelivery),
    },
    EdgeRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Cancelled,
        auth: EdgeAuth::OwnerOrOverride {
            owner: Capability::CancelOwnPending,
            override_cap: Capability::CancelOrder,
        },
    },
    EdgeRule {
        from: OrderStatus::Validated,
        to: OrderStatus::Cancelled,
        auth: EdgeAuth::Capability(Capability::CancelOrder),
    },
];

/// The rule for an edge, if the edge exists.
pub fn rule_for(from: OrderStatus, to: OrderStatus) -> Option<&'static EdgeRule> {
    TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
}

/// Legal successor statuses of `from`.
pub fn successors(from: OrderStatus) -> Vec<OrderStatus> {
    TRANSITIONS
        .iter()
        .filter(|r| r.from == from)
        .map(|r| r.to)
        .collect()
}
