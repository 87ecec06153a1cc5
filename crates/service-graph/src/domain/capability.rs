//! Capability identifiers
//!
//! A capability is an interface-shaped contract a component fulfills. Each
//! one is named by a static string and carries the interface type it
//! resolves to, so resolution is checked without runtime type scanning.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Untyped capability name, used as the graph node key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapabilityId(&'static str);

impl CapabilityId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Typed capability key. `T` is usually a trait object or a concrete
/// component type; resolution yields `Arc<T>`.
pub struct Capability<T: ?Sized> {
    id: CapabilityId,
    _interface: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized> Capability<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            id: CapabilityId::new(name),
            _interface: PhantomData,
        }
    }

    pub const fn id(&self) -> CapabilityId {
        self.id
    }

    pub const fn name(&self) -> &'static str {
        self.id.name()
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Capability<T> {}

impl<T: ?Sized> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.id.name()).finish()
    }
}

impl<T: ?Sized> From<Capability<T>> for CapabilityId {
    fn from(capability: Capability<T>) -> Self {
        capability.id
    }
}
