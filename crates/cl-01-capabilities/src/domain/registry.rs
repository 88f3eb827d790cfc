//! # Role → Capability Registry
//!
//! The static mapping from each role to the set of actions it may invoke.

use serde::{Deserialize, Serialize};
use shared_types::Role;
use tracing::warn;

use super::errors::CapabilityError;

/// A named permission consulted before authorizing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Create a new order.
    CreateOrder,
    /// Cancel one's own order while it is still pending.
    CancelOwnPending,
    /// Cancel any cancellable order (pending or validated).
    CancelOrder,
    /// Validate a pending order.
    ValidateOrder,
    /// Move a validated order into preparation.
    BeginProcessing,
    /// Hand a processing order to the carrier.
    ShipOrder,
    /// Confirm delivery of a shipped order.
    ConfirmDelivery,
    /// Write a correction entry (paired with its field patch).
    WriteCorrection,
    /// Read operation records (orders, settlements, corrections).
    ReadOperations,
    /// Restock works and maintain stock thresholds.
    ManageStock,
    /// Maintain catalog entries.
    ManageCatalog,
    /// Run royalty payout batches.
    SettleRoyalties,
}

/// Capability set of a role.
///
/// The executive arm is intentionally exhaustive: it holds every capability,
/// including the ones no other role has (`CancelOrder`, `ValidateOrder`,
/// `WriteCorrection`, `SettleRoyalties`).
pub fn capabilities_for(role: Role) -> &'static [Capability] {
    use Capability::*;
    match role {
        Role::Buyer => &[CreateOrder, CancelOwnPending, ReadOperations],
        Role::Author => &[ReadOperations],
        Role::Designer => &[ManageCatalog, ReadOperations],
        Role::InstitutionalPartner => &[CreateOrder, ReadOperations],
        Role::CommercialRepresentative => &[ReadOperations],
        Role::WholesaleManager => &[
            ManageStock,
            BeginProcessing,
            ShipOrder,
            ConfirmDelivery,
            ReadOperations,
        ],
        Role::Executive => &[
            CreateOrder,
            CancelOwnPending,
            CancelOrder,
            ValidateOrder,
            BeginProcessing,
            ShipOrder,
            ConfirmDelivery,
            WriteCorrection,
            ReadOperations,
            ManageStock,
            ManageCatalog,
            SettleRoyalties,
        ],
    }
}

/// Whether `role` holds `capability`.
pub fn holds(role: Role, capability: Capability) -> bool {
    capabilities_for(role).contains(&capability)
}

/// Authorizes an action or returns [`CapabilityError::Unauthorized`].
///
/// Denials are logged; they are expected traffic (every dashboard button a
/// role cannot press funnels here), so the level is `warn`, not `error`.
pub fn authorize(role: Role, capability: Capability) -> Result<(), CapabilityError> {
    if holds(role, capability) {
        Ok(())
    } else {
        warn!("[cl-01] denied: role '{}' lacks {:?}", role, capability);
        Err(CapabilityError::Unauthorized { role, capability })
    }
}
