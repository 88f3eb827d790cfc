//! # cl-01-capabilities
//!
//! Capability Registry subsystem for Comptoir.
//!
//! ## Role in System
//!
//! - **Leaf Subsystem**: no dependencies besides `shared-types`.
//! - **Single Authorization Point**: every other subsystem consults this
//!   registry once at its boundary instead of scattering role checks
//!   through business logic.
//! - **Static Authority Model**: the role → capability mapping is a fixed
//!   table, not data; changing authority is a code change with review, not
//!   a runtime mutation.
//!
//! ## Authority Matrix
//!
//! | Role | Capabilities |
//! |------|--------------|
//! | buyer | `CreateOrder`, `CancelOwnPending`, `ReadOperations` |
//! | author | `ReadOperations` |
//! | designer | `ManageCatalog`, `ReadOperations` |
//! | institutional partner | `CreateOrder` (scope-checked), `ReadOperations` |
//! | commercial representative | `ReadOperations` only |
//! | wholesale manager | `ManageStock`, fulfilment edges, `ReadOperations` |
//! | executive | everything, sole holder of `WriteCorrection` |

pub mod domain;

pub use domain::*;
