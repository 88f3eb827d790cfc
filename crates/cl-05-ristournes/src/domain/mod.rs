//! Domain logic of the ristourne engine.

mod compute;
mod errors;

pub use compute::{compute_for_order, is_eligible, RistourneRateTable};
pub use errors::RistourneError;
