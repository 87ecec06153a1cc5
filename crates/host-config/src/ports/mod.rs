//! Ports module for host configuration

pub mod outbound;

pub use outbound::{ConfigurationSource, HostEnvironment};
