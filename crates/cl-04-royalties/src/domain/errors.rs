use platform_store::StoreError;
use shared_types::{SaleUnitRef, WorkId};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RoyaltyError {
    #[error("acting role lacks the royalty-settlement capability")]
    Unauthorized,

    #[error("order references unknown work {work}")]
    UnknownWork { work: WorkId },

    /// A sale unit was accrued twice. Unreachable through the order state
    /// machine (validation is version-guarded); checked defensively.
    #[error("duplicate settlement for sale unit {unit}")]
    DuplicateSettlement { unit: SaleUnitRef },

    #[error("empty payout window: from {from} is not before to {to}")]
    EmptyWindow { from: u64, to: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
