//! # Store Errors

use thiserror::Error;

/// Errors surfaced by the store boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A version guard did not match the committed record.
    #[error("version conflict on {entity}: expected {expected}, found {found}")]
    VersionConflict {
        /// Description of the guarded record.
        entity: String,
        /// Version the transaction was built against.
        expected: u64,
        /// Version actually committed.
        found: u64,
    },

    /// An append hit an existing record with the same natural key.
    #[error("duplicate record: {key}")]
    DuplicateRecord {
        /// Natural key of the record that already exists.
        key: String,
    },

    /// A guard or write referenced a record that does not exist.
    #[error("unknown entity: {entity}")]
    UnknownEntity {
        /// Description of the missing record.
        entity: String,
    },

    /// A field patch targeted a field outside the correctable whitelist.
    #[error("field '{field}' is not correctable on {entity}")]
    UnsupportedField {
        /// Entity kind the patch targeted.
        entity: &'static str,
        /// Rejected field name.
        field: String,
    },

    /// A field patch carried a value of the wrong shape.
    #[error("invalid value for field '{field}': {detail}")]
    InvalidValue {
        /// Patched field name.
        field: String,
        /// Parse failure detail.
        detail: String,
    },

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}
