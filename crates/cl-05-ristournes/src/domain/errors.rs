use platform_store::StoreError;
use shared_types::{OrderId, WorkId};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RistourneError {
    #[error("order references unknown work {work}")]
    UnknownWork { work: WorkId },

    /// A second record was computed for an already-settled order.
    /// Unreachable through the guarded trigger; checked defensively.
    #[error("duplicate settlement: ristourne already exists for order {order}")]
    DuplicateSettlement { order: OrderId },

    #[error(transparent)]
    Store(#[from] StoreError),
}
