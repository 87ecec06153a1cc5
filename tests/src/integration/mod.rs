//! Cross-crate integration tests.

pub mod composition_graph;
pub mod layered_configuration;
pub mod startup_flow;
