//! Request scopes
//!
//! A scope is one unit of work. Scoped registrations resolve to one instance
//! per scope; the factory runs at most once per scope even when the scope is
//! shared between threads.

use crate::catalog::Catalog;
use crate::domain::capability::{Capability, CapabilityId};
use crate::domain::errors::GraphError;
use crate::domain::registration::Instance;
use crate::resolver::Resolver;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct ServiceScope<'r> {
    id: Uuid,
    catalog: &'r Catalog,
    instances: Mutex<HashMap<CapabilityId, Arc<OnceCell<Instance>>>>,
}

impl<'r> ServiceScope<'r> {
    pub(crate) fn new(catalog: &'r Catalog) -> Self {
        let id = Uuid::new_v4();
        debug!(scope = %id, "Scope created");
        Self {
            id,
            catalog,
            instances: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolve any capability within this scope.
    pub fn resolve<T>(&self, capability: Capability<T>) -> Result<Arc<T>, GraphError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Resolver::new(self.catalog, None, Some(self)).get(capability)
    }

    /// Number of scoped instances constructed so far.
    pub fn len(&self) -> usize {
        self.instances
            .lock()
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached instance for `capability`, constructing it on first use.
    ///
    /// The map lock is released before `construct` runs so scoped factories
    /// can resolve other scoped capabilities.
    pub(crate) fn instance(
        &self,
        capability: CapabilityId,
        construct: impl FnOnce() -> Result<Instance, GraphError>,
    ) -> Result<Instance, GraphError> {
        let cell = self
            .instances
            .lock()
            .entry(capability)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();
        cell.get_or_try_init(construct).cloned()
    }
}

impl Drop for ServiceScope<'_> {
    fn drop(&mut self) {
        debug!(scope = %self.id, instances = self.instances.get_mut().len(), "Scope released");
    }
}
