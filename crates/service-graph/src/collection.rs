//! Composition graph declaration and finalize
//!
//! Registrations are declared first, then `finalize` runs exactly once:
//! 1. Close the graph to further registration
//! 2. Check every declared dependency is registered
//! 3. Order registrations with Kahn's algorithm; name a cycle if one exists
//! 4. Reject singletons that capture scoped instances
//! 5. Construct singletons eagerly, dependencies first

use crate::algorithms::{find_captive, find_cycle, topological_order};
use crate::catalog::Catalog;
use crate::domain::capability::{Capability, CapabilityId};
use crate::domain::errors::GraphError;
use crate::domain::invariants;
use crate::domain::lifetime::Lifetime;
use crate::domain::registration::{Activator, Factory, Instance, Registration};
use crate::registry::ServiceRegistry;
use crate::resolver::Resolver;
use host_config::ResolvedConfiguration;
use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registration set under construction.
pub struct CompositionGraph {
    registrations: Vec<Registration>,
    index: HashMap<CapabilityId, usize>,
    closed: bool,
    configuration: Arc<ResolvedConfiguration>,
}

impl CompositionGraph {
    /// Graph whose factories see `configuration`.
    pub fn new(configuration: Arc<ResolvedConfiguration>) -> Self {
        Self {
            registrations: Vec::new(),
            index: HashMap::new(),
            closed: false,
            configuration,
        }
    }

    pub fn configuration(&self) -> &ResolvedConfiguration {
        &self.configuration
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn contains(&self, capability: CapabilityId) -> bool {
        self.index.contains_key(&capability)
    }

    pub fn is_finalized(&self) -> bool {
        self.closed
    }

    /// Declare `capability`. Fails if it is already registered.
    pub fn register<T, F>(
        &mut self,
        capability: Capability<T>,
        lifetime: Lifetime,
        dependencies: &[CapabilityId],
        factory: F,
    ) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
    {
        let registration = Registration::new(
            capability.id(),
            lifetime,
            dependencies,
            type_name::<T>(),
            Activator::Factory(erase(factory)),
        );
        self.insert(registration, false)
    }

    /// Declare `capability`, replacing an existing registration in place.
    ///
    /// This is the only way to override a registration.
    pub fn replace<T, F>(
        &mut self,
        capability: Capability<T>,
        lifetime: Lifetime,
        dependencies: &[CapabilityId],
        factory: F,
    ) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
    {
        let registration = Registration::new(
            capability.id(),
            lifetime,
            dependencies,
            type_name::<T>(),
            Activator::Factory(erase(factory)),
        );
        self.insert(registration, true)
    }

    pub fn add_singleton<T, F>(
        &mut self,
        capability: Capability<T>,
        dependencies: &[CapabilityId],
        factory: F,
    ) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
    {
        self.register(capability, Lifetime::Singleton, dependencies, factory)
    }

    pub fn add_scoped<T, F>(
        &mut self,
        capability: Capability<T>,
        dependencies: &[CapabilityId],
        factory: F,
    ) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
    {
        self.register(capability, Lifetime::Scoped, dependencies, factory)
    }

    pub fn add_transient<T, F>(
        &mut self,
        capability: Capability<T>,
        dependencies: &[CapabilityId],
        factory: F,
    ) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
    {
        self.register(capability, Lifetime::Transient, dependencies, factory)
    }

    /// Register a pre-built singleton.
    pub fn add_instance<T>(&mut self, capability: Capability<T>, instance: Arc<T>) -> Result<(), GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let erased: Instance = Arc::new(instance);
        let registration = Registration::new(
            capability.id(),
            Lifetime::Singleton,
            &[],
            type_name::<T>(),
            Activator::Instance(Some(erased)),
        );
        self.insert(registration, false)
    }

    fn insert(&mut self, registration: Registration, replace: bool) -> Result<(), GraphError> {
        let capability = registration.capability;
        if self.closed {
            return Err(GraphError::RegistrationClosed { capability });
        }

        match self.index.get(&capability) {
            Some(&position) if replace => {
                warn!(
                    capability = %capability,
                    previous = %self.registrations[position].lifetime,
                    lifetime = %registration.lifetime,
                    "Replacing registration"
                );
                self.registrations[position] = registration;
            }
            Some(_) => return Err(GraphError::DuplicateRegistration { capability }),
            None => {
                debug!(
                    capability = %capability,
                    lifetime = %registration.lifetime,
                    dependencies = registration.dependencies.len(),
                    "Registered capability"
                );
                self.index.insert(capability, self.registrations.len());
                self.registrations.push(registration);
            }
        }
        Ok(())
    }

    /// Validate the graph and build the registry. Callable once.
    pub fn finalize(&mut self) -> Result<ServiceRegistry, GraphError> {
        if self.closed {
            return Err(GraphError::AlreadyFinalized);
        }
        self.closed = true;

        let registrations = std::mem::take(&mut self.registrations);
        let index = std::mem::take(&mut self.index);

        // 1. Every declared dependency must be registered
        let mut dependencies: Vec<Vec<usize>> = Vec::with_capacity(registrations.len());
        for registration in &registrations {
            let mut edges = Vec::with_capacity(registration.dependencies.len());
            for dependency in &registration.dependencies {
                let Some(&target) = index.get(dependency) else {
                    return Err(GraphError::MissingDependency {
                        capability: registration.capability,
                        dependency: *dependency,
                    });
                };
                edges.push(target);
            }
            dependencies.push(edges);
        }

        // 2. Construction order; leftovers mean a cycle
        let order = match topological_order(&dependencies) {
            Ok(order) => order,
            Err(unscheduled) => {
                let cycle = find_cycle(&dependencies, &unscheduled)
                    .unwrap_or(unscheduled)
                    .into_iter()
                    .map(|i| registrations[i].capability)
                    .collect();
                return Err(GraphError::CycleDetected { cycle });
            }
        };

        // 3. Singletons must not capture scoped instances
        let lifetimes: Vec<Lifetime> = registrations.iter().map(|r| r.lifetime).collect();
        if let Some((singleton, scoped)) = find_captive(&lifetimes, &dependencies) {
            return Err(GraphError::LifetimeMismatch {
                capability: registrations[singleton].capability,
                dependency: registrations[scoped].capability,
            });
        }

        let order_ids: Vec<CapabilityId> = order.iter().map(|&i| registrations[i].capability).collect();
        debug_assert!(invariants::invariant_unique_capabilities(&registrations));
        debug_assert!(invariants::invariant_no_cycles(&registrations));
        debug_assert!(invariants::invariant_topological_order(&order_ids, &registrations));

        // 4. Eager singletons, dependencies first
        let mut catalog = Catalog::new(registrations, self.configuration.clone());
        let mut constructed = Vec::new();
        for &position in &order {
            if catalog.registrations[position].lifetime != Lifetime::Singleton {
                continue;
            }
            let capability = catalog.registrations[position].capability;
            let prebuilt = match &mut catalog.registrations[position].activator {
                Activator::Instance(slot) => Some(slot.take()),
                Activator::Factory(_) => None,
            };
            let instance = match prebuilt {
                Some(Some(instance)) => instance,
                Some(None) => {
                    return Err(GraphError::Construction {
                        capability,
                        message: "pre-built instance missing".to_string(),
                    })
                }
                None => catalog.construct(&catalog.registrations[position], None)?,
            };
            catalog.singletons.insert(capability, instance);
            constructed.push(capability);
        }

        info!(
            registrations = catalog.registrations.len(),
            singletons = constructed.len(),
            "Composition graph finalized"
        );

        Ok(ServiceRegistry::new(catalog, order_ids, constructed))
    }
}

impl Default for CompositionGraph {
    fn default() -> Self {
        Self::new(Arc::new(ResolvedConfiguration::default()))
    }
}

fn erase<T, F>(factory: F) -> Factory
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&Resolver<'_>) -> Result<Arc<T>, GraphError> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &Resolver<'_>| {
        let instance: Instance = Arc::new(factory(resolver)?);
        Ok(instance)
    })
}
