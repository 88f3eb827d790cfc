use cl_01_capabilities::CapabilityError;
use cl_02_inventory::InventoryError;
use cl_04_royalties::RoyaltyError;
use cl_05_ristournes::RistourneError;
use platform_store::StoreError;
use shared_types::{Clientele, OrderId, OrderStatus, PartyId, Role, WorkId};
use thiserror::Error;

/// Errors of the order state machine, flattened to the taxonomy the
/// dashboard layer consumes. `StaleState` is the only variant eligible for
/// automatic caller-side retry.
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("invalid transition: {from} → {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("role '{role}' may not {action}")]
    Unauthorized { role: Role, action: String },

    #[error("stale state: order {order} was moved by a concurrent actor")]
    StaleState { order: OrderId },

    #[error("insufficient stock for work {work}: requested {requested}, available {available}")]
    InsufficientStock {
        work: WorkId,
        requested: u32,
        available: u32,
    },

    #[error(
        "partner scope violation: work {work} serves {work_clientele:?}, \
         partner is designated for {designated:?}"
    )]
    ScopeViolation {
        work: WorkId,
        work_clientele: Clientele,
        designated: Clientele,
    },

    #[error("institutional partner carries no designated scope")]
    MissingScope,

    /// Defensive: an idempotency key was violated despite the guards.
    #[error("duplicate settlement: {key}")]
    DuplicateSettlement { key: String },

    #[error("order has no lines")]
    EmptyOrder,

    #[error("line for work {work} has zero quantity")]
    ZeroQuantity { work: WorkId },

    #[error("unknown order: {order}")]
    UnknownOrder { order: OrderId },

    #[error("unknown work: {work}")]
    UnknownWork { work: WorkId },

    #[error("unknown party: {party}")]
    UnknownParty { party: PartyId },

    /// An inventory invariant was violated mid-transition. Unreachable
    /// through the state machine; checked defensively.
    #[error("inventory invariant violated: {0}")]
    InventoryInvariant(String),

    /// A settlement engine rejected its computation; the enclosing
    /// transition was rolled back.
    #[error("settlement failed: {0}")]
    SettlementFailed(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<CapabilityError> for OrderError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Unauthorized { role, capability } => OrderError::Unauthorized {
                role,
                action: format!("exercise {capability:?}"),
            },
            CapabilityError::ScopeViolation {
                work,
                work_clientele,
                designated,
            } => OrderError::ScopeViolation {
                work,
                work_clientele,
                designated,
            },
            CapabilityError::MissingScope => OrderError::MissingScope,
        }
    }
}

impl From<InventoryError> for OrderError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock {
                work,
                requested,
                available,
            } => OrderError::InsufficientStock {
                work,
                requested,
                available,
            },
            InventoryError::UnknownWork { work } => OrderError::UnknownWork { work },
            InventoryError::Store(e) => OrderError::Store(e),
            other => OrderError::InventoryInvariant(other.to_string()),
        }
    }
}

impl From<RoyaltyError> for OrderError {
    fn from(err: RoyaltyError) -> Self {
        match err {
            RoyaltyError::UnknownWork { work } => OrderError::UnknownWork { work },
            RoyaltyError::DuplicateSettlement { unit } => OrderError::DuplicateSettlement {
                key: format!("sale unit {unit}"),
            },
            RoyaltyError::Store(e) => OrderError::Store(e),
            other => OrderError::SettlementFailed(other.to_string()),
        }
    }
}

impl From<RistourneError> for OrderError {
    fn from(err: RistourneError) -> Self {
        match err {
            RistourneError::UnknownWork { work } => OrderError::UnknownWork { work },
            RistourneError::DuplicateSettlement { order } => OrderError::DuplicateSettlement {
                key: format!("ristourne for order {order}"),
            },
            RistourneError::Store(e) => OrderError::Store(e),
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        OrderError::Store(err)
    }
}

impl OrderError {
    /// Maps a commit failure onto the transition-level taxonomy: a version
    /// conflict means a concurrent actor won the race; a duplicate record
    /// means an idempotency key fired.
    pub fn from_commit(order: OrderId, err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { .. } => OrderError::StaleState { order },
            StoreError::DuplicateRecord { key } => OrderError::DuplicateSettlement { key },
            other => OrderError::Store(other),
        }
    }
}
