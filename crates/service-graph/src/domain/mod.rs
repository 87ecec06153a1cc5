//! Domain module for the composition graph
//!
//! Capabilities, lifetimes, registrations, errors and invariants.

pub mod capability;
pub mod errors;
pub mod invariants;
pub mod lifetime;
pub mod registration;

pub use capability::{Capability, CapabilityId};
pub use errors::GraphError;
pub use lifetime::Lifetime;
pub use registration::{Factory, Instance, Registration};
