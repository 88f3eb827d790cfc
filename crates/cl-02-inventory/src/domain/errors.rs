use platform_store::StoreError;
use shared_types::WorkId;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    #[error("insufficient stock for work {work}: requested {requested}, available {available}")]
    InsufficientStock {
        work: WorkId,
        requested: u32,
        available: u32,
    },

    /// A release or confirm exceeded the reserved quantity. Unreachable
    /// through the order state machine; checked defensively.
    #[error(
        "reservation underflow on work {work}: requested {requested}, reserved {reserved}"
    )]
    ReservationUnderflow {
        work: WorkId,
        requested: u32,
        reserved: u32,
    },

    #[error("unknown work: {work}")]
    UnknownWork { work: WorkId },

    #[error("acting role lacks the stock-management capability")]
    Unauthorized,

    /// Retries exhausted under write contention on the same work.
    #[error("concurrent stock movement on work {work}, retry")]
    Contention { work: WorkId },

    #[error(transparent)]
    Store(#[from] StoreError),
}
