//! # Counterparty Scope
//!
//! Institutional partners are bound to one designated clientele category.
//! An order line whose work serves a different clientele is rejected before
//! any stock is touched.

use shared_types::{Party, Role, Work};

use super::errors::CapabilityError;

/// Checks that `buyer` may order `work`.
///
/// Only institutional partners carry a scope; every other role orders
/// freely across the catalog.
pub fn check_order_scope(buyer: &Party, work: &Work) -> Result<(), CapabilityError> {
    if buyer.role != Role::InstitutionalPartner {
        return Ok(());
    }
    let designated = buyer.partner_scope.ok_or(CapabilityError::MissingScope)?;
    if work.clientele == designated {
        Ok(())
    } else {
        Err(CapabilityError::ScopeViolation {
            work: work.id,
            work_clientele: work.clientele,
            designated,
        })
    }
}
