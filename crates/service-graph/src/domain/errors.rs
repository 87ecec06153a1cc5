//! Error types for the composition graph

use super::capability::CapabilityId;
use host_config::ConfigError;
use thiserror::Error;

/// All errors that can occur while declaring, validating or resolving the
/// service graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Capability registered twice without `replace`
    #[error("capability '{capability}' is already registered")]
    DuplicateRegistration { capability: CapabilityId },

    /// Registration attempted after `finalize`
    #[error("cannot register '{capability}': the graph has been finalized")]
    RegistrationClosed { capability: CapabilityId },

    /// `finalize` called a second time
    #[error("the composition graph has already been finalized")]
    AlreadyFinalized,

    /// A declared dependency has no registration
    #[error("'{capability}' depends on '{dependency}', which is not registered")]
    MissingDependency {
        capability: CapabilityId,
        dependency: CapabilityId,
    },

    /// The dependency graph is not acyclic
    #[error("dependency cycle detected: {}", render_cycle(cycle))]
    CycleDetected { cycle: Vec<CapabilityId> },

    /// A singleton would capture a scoped instance
    #[error("singleton '{capability}' depends on scoped '{dependency}'")]
    LifetimeMismatch {
        capability: CapabilityId,
        dependency: CapabilityId,
    },

    #[error("capability '{capability}' is not registered")]
    NotRegistered { capability: CapabilityId },

    /// A factory resolved something it did not declare
    #[error("'{capability}' resolved undeclared dependency '{dependency}'")]
    UndeclaredDependency {
        capability: CapabilityId,
        dependency: CapabilityId,
    },

    #[error("scoped capability '{capability}' must be resolved through a scope")]
    ScopeRequired { capability: CapabilityId },

    /// Stored instance is not of the requested interface type
    #[error("capability '{capability}' does not provide {expected}")]
    TypeMismatch {
        capability: CapabilityId,
        expected: &'static str,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A factory failed for a reason of its own
    #[error("failed to construct '{capability}': {message}")]
    Construction {
        capability: CapabilityId,
        message: String,
    },
}

/// `a -> b -> a`
pub fn render_cycle(cycle: &[CapabilityId]) -> String {
    cycle
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}
