//! Domain logic of the royalty engine.

mod accrual;
mod errors;

pub use accrual::{accrue_for_order, PayoutWindow, DEFAULT_ROYALTY_RATE_BP};
pub use errors::RoyaltyError;
