//! # Shared Types Crate
//!
//! This crate contains all domain entities shared across the Comptoir
//! subsystems: identifiers, catalog and order entities, settlement records,
//! and the role model.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Actors**: Every mutating core call receives an [`Actor`];
//!   no subsystem infers a "current role" from ambient context.
//! - **Whole-Unit Money**: Amounts are zero-decimal integers. Rates are
//!   integer basis points. Division happens once per line or unit, never
//!   inside an accumulation.

pub mod entities;
pub mod ids;
pub mod roles;

pub use entities::*;
pub use ids::*;
pub use roles::*;
