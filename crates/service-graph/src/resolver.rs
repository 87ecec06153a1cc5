//! Dependency access for factories

use crate::catalog::Catalog;
use crate::domain::capability::{Capability, CapabilityId};
use crate::domain::errors::GraphError;
use crate::domain::registration::{Instance, Registration};
use crate::scope::ServiceScope;
use host_config::ResolvedConfiguration;
use std::any::type_name;
use std::sync::Arc;
use uuid::Uuid;

/// Handed to every factory invocation.
///
/// Exposes the resolved configuration by explicit argument and resolves only
/// the dependencies the requesting registration declared.
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    requester: Option<&'a Registration>,
    scope: Option<&'a ServiceScope<'a>>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        catalog: &'a Catalog,
        requester: Option<&'a Registration>,
        scope: Option<&'a ServiceScope<'a>>,
    ) -> Self {
        Self {
            catalog,
            requester,
            scope,
        }
    }

    pub fn configuration(&self) -> &ResolvedConfiguration {
        &self.catalog.configuration
    }

    /// Capability being constructed. `None` for root resolution.
    pub fn requester(&self) -> Option<CapabilityId> {
        self.requester.map(|r| r.capability)
    }

    /// Scope the resolution runs in, if any.
    pub fn scope_id(&self) -> Option<Uuid> {
        self.scope.map(|s| s.id())
    }

    /// Resolve a declared dependency.
    pub fn get<T>(&self, capability: Capability<T>) -> Result<Arc<T>, GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if let Some(requester) = self.requester {
            if !requester.depends_on(capability.id()) {
                return Err(GraphError::UndeclaredDependency {
                    capability: requester.capability,
                    dependency: capability.id(),
                });
            }
        }
        let instance = self.catalog.activate(capability.id(), self.scope)?;
        downcast(capability, &instance)
    }
}

pub(crate) fn downcast<T>(capability: Capability<T>, instance: &Instance) -> Result<Arc<T>, GraphError>
where
    T: ?Sized + Send + Sync + 'static,
{
    (**instance)
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(GraphError::TypeMismatch {
            capability: capability.id(),
            expected: type_name::<T>(),
        })
}
