//! Domain logic of the capability registry.

mod errors;
mod registry;
mod scope;

pub use errors::CapabilityError;
pub use registry::{authorize, capabilities_for, holds, Capability};
pub use scope::check_order_scope;
