use platform_store::StoreError;
use shared_types::{CorrectionTarget, Role};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("role '{role}' may not write corrections")]
    Unauthorized { role: Role },

    #[error("a correction requires a non-empty reason")]
    MissingReason,

    #[error("field '{field}' is not correctable on {entity}")]
    UnsupportedField { entity: &'static str, field: String },

    #[error("correction target not found: {target}")]
    UnknownTarget { target: CorrectionTarget },

    #[error("invalid value for field '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    #[error("target {target} was modified concurrently, re-read and retry")]
    StaleState { target: CorrectionTarget },

    #[error(transparent)]
    Store(StoreError),
}
