//! # Service Composition Graph
//!
//! A small dependency-injection container with explicit validation.
//!
//! ## Architecture
//!
//! - **Domain**: `Capability<T>`, `Lifetime`, `Registration`, `GraphError`, invariants
//! - **Algorithms**: Kahn's topological sort, cycle naming, captive-dependency check
//! - **CompositionGraph**: declaration phase, closed by a single `finalize`
//! - **ServiceRegistry**: the read-only result; `ServiceScope` for units of work
//!
//! ## Lifetimes
//!
//! | Lifetime | Instances |
//! |----------|-----------|
//! | Singleton | one per registry, built eagerly during `finalize` |
//! | Scoped | one per `ServiceScope` |
//! | Transient | one per resolution |

pub mod algorithms;
mod catalog;
pub mod collection;
pub mod domain;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use collection::CompositionGraph;
pub use domain::errors::render_cycle;
pub use domain::{Capability, CapabilityId, Factory, GraphError, Instance, Lifetime, Registration};
pub use registry::ServiceRegistry;
pub use resolver::Resolver;
pub use scope::ServiceScope;
