//! # Correction Service
//!
//! Writes the correction entry and applies the field patch as one atomic
//! pair, guarded by the target's version.

use std::sync::Arc;

use cl_01_capabilities::{authorize, Capability};
use platform_store::{
    patch, Guard, MarketplaceStore, StoreError, StoreWrite, TimeSource, Transaction,
};
use serde_json::Value;
use shared_types::{Actor, CorrectionEntry, CorrectionId, CorrectionTarget};
use tracing::info;

use crate::domain::AuditError;

/// The audit-log service.
pub struct CorrectionService<S, T> {
    store: Arc<S>,
    time: Arc<T>,
}

impl<S: MarketplaceStore, T: TimeSource> CorrectionService<S, T> {
    /// Creates the service.
    pub fn new(store: Arc<S>, time: Arc<T>) -> Self {
        Self { store, time }
    }

    /// Corrects one whitelisted field of a settled record.
    ///
    /// Fails `Unauthorized` unless the actor holds `WriteCorrection`
    /// (executive only) and `MissingReason` on a blank reason. On success
    /// the entry and the patch commit together; if the target moved
    /// concurrently the pair is rejected with `StaleState` and nothing is
    /// written.
    pub fn correct(
        &self,
        actor: &Actor,
        target: CorrectionTarget,
        field: &str,
        new_value: Value,
        reason: &str,
    ) -> Result<CorrectionEntry, AuditError> {
        authorize(actor.role, Capability::WriteCorrection)
            .map_err(|_| AuditError::Unauthorized { role: actor.role })?;

        if reason.trim().is_empty() {
            return Err(AuditError::MissingReason);
        }
        if !patch::is_correctable(&target, field) {
            return Err(AuditError::UnsupportedField {
                entity: target_entity(&target),
                field: field.to_string(),
            });
        }

        let (old_value, version) =
            self.store
                .read_field(&target, field)
                .map_err(|e| match e {
                    StoreError::UnknownEntity { .. } => AuditError::UnknownTarget { target },
                    StoreError::UnsupportedField { entity, field } => {
                        AuditError::UnsupportedField { entity, field }
                    }
                    other => AuditError::Store(other),
                })?;

        let entry = CorrectionEntry {
            id: CorrectionId::generate(),
            target,
            field: field.to_string(),
            old_value,
            new_value: new_value.clone(),
            reason: reason.to_string(),
            actor: actor.party,
            actor_role: actor.role,
            at: self.time.now(),
        };

        let tx = Transaction::new()
            .guard(version_guard(&target, version))
            .write(StoreWrite::AppendCorrection(entry.clone()))
            .write(StoreWrite::PatchField {
                target,
                field: field.to_string(),
                value: new_value,
            });

        self.store.commit(tx).map_err(|e| match e {
            StoreError::VersionConflict { .. } => AuditError::StaleState { target },
            StoreError::InvalidValue { field, detail } => {
                AuditError::InvalidValue { field, detail }
            }
            StoreError::UnsupportedField { entity, field } => {
                AuditError::UnsupportedField { entity, field }
            }
            other => AuditError::Store(other),
        })?;

        info!(
            "[cl-06] correction {} on {}: field '{}' changed by {}",
            entry.id, entry.target, entry.field, entry.actor
        );
        Ok(entry)
    }

    /// Correction entries, optionally filtered by target. Read-only; the
    /// log has no update or delete operation.
    pub fn list(
        &self,
        target: Option<CorrectionTarget>,
    ) -> Result<Vec<CorrectionEntry>, AuditError> {
        self.store.corrections(target).map_err(AuditError::Store)
    }
}

fn target_entity(target: &CorrectionTarget) -> &'static str {
    match target {
        CorrectionTarget::Order(_) => "order",
        CorrectionTarget::Work(_) => "work",
        CorrectionTarget::Royalty(_) => "royalty",
        CorrectionTarget::Ristourne(_) => "ristourne",
    }
}

fn version_guard(target: &CorrectionTarget, version: u64) -> Guard {
    match target {
        CorrectionTarget::Order(id) => Guard::OrderVersion(*id, version),
        CorrectionTarget::Work(id) => Guard::WorkVersion(*id, version),
        CorrectionTarget::Royalty(id) => Guard::RoyaltyVersion(*id, version),
        CorrectionTarget::Ristourne(id) => Guard::RistourneVersion(*id, version),
    }
}
