//! The finalized service registry
//!
//! Immutable after `CompositionGraph::finalize`. Safe to share between
//! request-handling threads; singleton instances must be `Send + Sync`.

use crate::catalog::Catalog;
use crate::domain::capability::{Capability, CapabilityId};
use crate::domain::errors::GraphError;
use crate::domain::lifetime::Lifetime;
use crate::resolver::Resolver;
use crate::scope::ServiceScope;
use host_config::ResolvedConfiguration;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct ServiceRegistry {
    catalog: Catalog,
    /// Every capability, dependencies first
    order: Vec<CapabilityId>,
    /// Singletons in the order they were constructed
    constructed: Vec<CapabilityId>,
}

impl ServiceRegistry {
    pub(crate) fn new(catalog: Catalog, order: Vec<CapabilityId>, constructed: Vec<CapabilityId>) -> Self {
        Self {
            catalog,
            order,
            constructed,
        }
    }

    /// Resolve from the root. Scoped capabilities fail with `ScopeRequired`.
    pub fn resolve<T>(&self, capability: Capability<T>) -> Result<Arc<T>, GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Resolver::new(&self.catalog, None, None).get(capability)
    }

    /// Start a unit of work.
    pub fn create_scope(&self) -> ServiceScope<'_> {
        ServiceScope::new(&self.catalog)
    }

    pub fn configuration(&self) -> &ResolvedConfiguration {
        &self.catalog.configuration
    }

    pub fn contains(&self, capability: CapabilityId) -> bool {
        self.catalog.index.contains_key(&capability)
    }

    pub fn len(&self) -> usize {
        self.catalog.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.registrations.is_empty()
    }

    /// Capabilities in registration order.
    pub fn capabilities(&self) -> Vec<CapabilityId> {
        self.catalog
            .registrations
            .iter()
            .map(|r| r.capability)
            .collect()
    }

    pub fn lifetime_of(&self, capability: CapabilityId) -> Option<Lifetime> {
        self.catalog.registration(capability).ok().map(|r| r.lifetime)
    }

    pub fn dependencies_of(&self, capability: CapabilityId) -> Option<&[CapabilityId]> {
        self.catalog
            .registration(capability)
            .ok()
            .map(|r| r.dependencies.as_slice())
    }

    /// `(dependent, dependency)` pairs in registration order.
    pub fn edges(&self) -> Vec<(CapabilityId, CapabilityId)> {
        self.catalog
            .registrations
            .iter()
            .flat_map(|r| r.dependencies.iter().map(move |d| (r.capability, *d)))
            .collect()
    }

    /// Topological order over all registrations.
    pub fn construction_order(&self) -> &[CapabilityId] {
        &self.order
    }

    /// Singletons, in the order they were constructed.
    pub fn singletons(&self) -> &[CapabilityId] {
        &self.constructed
    }

    pub fn count_by_lifetime(&self, lifetime: Lifetime) -> usize {
        self.catalog
            .registrations
            .iter()
            .filter(|r| r.lifetime == lifetime)
            .count()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("order", &self.order)
            .field("singletons", &self.constructed)
            .finish_non_exhaustive()
    }
}

impl Drop for ServiceRegistry {
    fn drop(&mut self) {
        for capability in self.constructed.iter().rev() {
            if self.catalog.singletons.remove(capability).is_some() {
                debug!(capability = %capability, "Released singleton");
            }
        }
    }
}
