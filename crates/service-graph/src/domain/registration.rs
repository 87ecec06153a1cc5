//! Service registrations

use super::capability::CapabilityId;
use super::errors::GraphError;
use super::lifetime::Lifetime;
use crate::resolver::Resolver;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased instance. Always wraps an `Arc<T>` for the capability's `T`.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory.
pub type Factory = Arc<dyn Fn(&Resolver<'_>) -> Result<Instance, GraphError> + Send + Sync>;

/// How a registration produces its instance.
#[derive(Clone)]
pub(crate) enum Activator {
    Factory(Factory),
    /// Pre-built singleton; moved into the registry at finalize
    Instance(Option<Instance>),
}

/// One entry of the composition graph.
#[derive(Clone)]
pub struct Registration {
    pub capability: CapabilityId,
    pub lifetime: Lifetime,
    /// Declared dependencies, deduplicated, in declaration order
    pub dependencies: Vec<CapabilityId>,
    /// Interface type name, for diagnostics
    pub interface: &'static str,
    pub(crate) activator: Activator,
}

impl Registration {
    pub(crate) fn new(
        capability: CapabilityId,
        lifetime: Lifetime,
        dependencies: &[CapabilityId],
        interface: &'static str,
        activator: Activator,
    ) -> Self {
        let mut unique: Vec<CapabilityId> = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if !unique.contains(dependency) {
                unique.push(*dependency);
            }
        }
        Self {
            capability,
            lifetime,
            dependencies: unique,
            interface,
            activator,
        }
    }

    pub fn depends_on(&self, capability: CapabilityId) -> bool {
        self.dependencies.contains(&capability)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("capability", &self.capability)
            .field("lifetime", &self.lifetime)
            .field("dependencies", &self.dependencies)
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}
