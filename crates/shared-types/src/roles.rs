//! # Role Model
//!
//! Every user of the platform holds exactly one primary role. The role is
//! the only input the capability registry consults, so core calls carry an
//! explicit [`Actor`] rather than reading a session-global "current role".

use serde::{Deserialize, Serialize};

use crate::ids::PartyId;

/// The seven actor roles of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Retail buyer: creates orders, may cancel its own pending orders.
    Buyer,
    /// Author of catalog works: reads its royalty statements.
    Author,
    /// Work designer: maintains the catalog entries.
    Designer,
    /// Institutional partner: orders within a fixed clientele scope,
    /// earns ristournes, never transitions orders.
    InstitutionalPartner,
    /// Commercial representative: read-only access to all operation records.
    CommercialRepresentative,
    /// Wholesale-distribution manager: stock management and fulfilment
    /// transitions (processing, shipping, delivery).
    WholesaleManager,
    /// Executive: every forward transition, plus exclusive correction rights.
    Executive,
}

impl Role {
    /// Human-readable label, shared with the dashboard layer.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Author => "author",
            Role::Designer => "designer",
            Role::InstitutionalPartner => "institutional partner",
            Role::CommercialRepresentative => "commercial representative",
            Role::WholesaleManager => "wholesale manager",
            Role::Executive => "executive",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The authenticated identity behind a core call.
///
/// Authentication itself happens outside this core; by the time a call
/// reaches a subsystem the actor is trusted to hold this role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Party performing the action.
    pub party: PartyId,
    /// The party's primary role.
    pub role: Role,
}

impl Actor {
    /// Convenience constructor.
    pub fn new(party: PartyId, role: Role) -> Self {
        Self { party, role }
    }
}
