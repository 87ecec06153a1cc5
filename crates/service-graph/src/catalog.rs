//! Activation of registrations
//!
//! Shared by the finalize step (eager singletons), the registry (root
//! resolution) and scopes.

use crate::domain::capability::CapabilityId;
use crate::domain::errors::GraphError;
use crate::domain::lifetime::Lifetime;
use crate::domain::registration::{Activator, Instance, Registration};
use crate::resolver::Resolver;
use crate::scope::ServiceScope;
use host_config::ResolvedConfiguration;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub(crate) struct Catalog {
    pub(crate) registrations: Vec<Registration>,
    pub(crate) index: HashMap<CapabilityId, usize>,
    pub(crate) singletons: HashMap<CapabilityId, Instance>,
    pub(crate) configuration: Arc<ResolvedConfiguration>,
}

impl Catalog {
    pub(crate) fn new(
        registrations: Vec<Registration>,
        configuration: Arc<ResolvedConfiguration>,
    ) -> Self {
        let index = registrations
            .iter()
            .enumerate()
            .map(|(i, r)| (r.capability, i))
            .collect();
        Self {
            registrations,
            index,
            singletons: HashMap::new(),
            configuration,
        }
    }

    pub(crate) fn registration(&self, capability: CapabilityId) -> Result<&Registration, GraphError> {
        self.index
            .get(&capability)
            .map(|&i| &self.registrations[i])
            .ok_or(GraphError::NotRegistered { capability })
    }

    /// Instance of `capability` according to its lifetime.
    pub(crate) fn activate(
        &self,
        capability: CapabilityId,
        scope: Option<&ServiceScope<'_>>,
    ) -> Result<Instance, GraphError> {
        let registration = self.registration(capability)?;
        match registration.lifetime {
            Lifetime::Singleton => {
                self.singletons
                    .get(&capability)
                    .cloned()
                    .ok_or_else(|| GraphError::Construction {
                        capability,
                        message: "singleton has not been constructed".to_string(),
                    })
            }
            Lifetime::Transient => self.construct(registration, scope),
            Lifetime::Scoped => {
                let scope = scope.ok_or(GraphError::ScopeRequired { capability })?;
                scope.instance(capability, || self.construct(registration, Some(scope)))
            }
        }
    }

    /// Invoke the registration's factory.
    pub(crate) fn construct(
        &self,
        registration: &Registration,
        scope: Option<&ServiceScope<'_>>,
    ) -> Result<Instance, GraphError> {
        debug!(
            capability = %registration.capability,
            lifetime = %registration.lifetime,
            "Constructing instance"
        );
        match &registration.activator {
            Activator::Factory(factory) => factory(&Resolver::new(self, Some(registration), scope)),
            Activator::Instance(Some(instance)) => Ok(instance.clone()),
            Activator::Instance(None) => Err(GraphError::Construction {
                capability: registration.capability,
                message: "pre-built instance was already moved into the registry".to_string(),
            }),
        }
    }
}
