//! # cl-06-audit
//!
//! Correction Audit Log subsystem for Comptoir.
//!
//! ## Role in System
//!
//! - **The Only Gate for Manual Corrections**: already-settled operations
//!   (orders, works, royalty and ristourne records) are never edited
//!   directly. The executive corrects them here, and every correction
//!   writes an append-only [`shared_types::CorrectionEntry`] committed
//!   atomically with the field patch it describes.
//! - **Append-Only by Construction**: the store exposes no write that can
//!   modify or delete a correction entry, at any authority level.
//! - **Exclusive Authority**: `WriteCorrection` is held by the executive
//!   role alone; every other role is rejected before anything is read.

pub mod domain;
pub mod service;

pub use domain::AuditError;
pub use service::CorrectionService;
