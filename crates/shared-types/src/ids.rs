//! # Identifiers
//!
//! UUID-backed newtypes for every entity the platform persists. Keeping
//! each id a distinct type prevents cross-wiring an order id into a work
//! lookup at compile time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of an [`crate::Order`].
    OrderId
);
uuid_id!(
    /// Identifier of a catalog [`crate::Work`].
    WorkId
);
uuid_id!(
    /// Identifier of a [`crate::Party`] (any actor: buyer, author, partner, staff).
    PartyId
);
uuid_id!(
    /// Identifier of a [`crate::RoyaltySale`] record.
    RoyaltyId
);
uuid_id!(
    /// Identifier of a [`crate::RistourneRecord`].
    RistourneId
);
uuid_id!(
    /// Identifier of a [`crate::CorrectionEntry`].
    CorrectionId
);
uuid_id!(
    /// Identifier of a royalty payout batch.
    BatchId
);

/// Natural key of a confirmed sale unit: one per physical copy sold.
///
/// Royalty accrual is idempotent on this key; a second accrual attempt for
/// the same unit is rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleUnitRef {
    /// Order the unit was sold under.
    pub order: OrderId,
    /// Zero-based index of the order line.
    pub line: u32,
    /// Zero-based index of the unit within the line.
    pub unit: u32,
}

impl std::fmt::Display for SaleUnitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.order, self.line, self.unit)
    }
}
