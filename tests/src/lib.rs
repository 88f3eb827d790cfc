//! # Comptoir Test Suite
//!
//! Unified test crate for cross-subsystem scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared builders (platform, parties, catalog)
//! └── integration/      # Cross-subsystem scenarios
//!     ├── lifecycle.rs  # Transition-graph conformance, delivery tracking
//!     ├── settlement.rs # Royalty and ristourne arithmetic and idempotence
//!     ├── authority.rs  # Role/capability matrix end to end
//!     ├── audit.rs      # Correction pairing and append-only trail
//!     └── concurrency.rs# Optimistic-isolation races
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cl-tests
//! cargo test -p cl-tests integration::lifecycle
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
