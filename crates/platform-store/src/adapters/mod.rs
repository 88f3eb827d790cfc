//! # Store Adapters
//!
//! Reference implementations of the store ports.

mod memory;
mod time;

pub use memory::InMemoryStore;
pub use time::{FixedTimeSource, SystemTimeSource};
