use shared_types::{Clientele, Role, WorkId};
use thiserror::Error;

use super::registry::Capability;

#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    #[error("role '{role}' does not hold capability {capability:?}")]
    Unauthorized { role: Role, capability: Capability },

    #[error(
        "partner scope violation: work {work} serves {work_clientele:?}, \
         partner is designated for {designated:?}"
    )]
    ScopeViolation {
        work: WorkId,
        work_clientele: Clientele,
        designated: Clientele,
    },

    #[error("party is an institutional partner but carries no designated scope")]
    MissingScope,
}
