//! Graph algorithms: ordering, cycle naming and lifetime checks

pub mod captive;
pub mod cycle;
pub mod kahns;

pub use captive::find_captive;
pub use cycle::find_cycle;
pub use kahns::topological_order;
