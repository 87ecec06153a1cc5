//! Service lifetime definitions.

use std::fmt;

/// Sharing policy for a registration's instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// One instance for the whole process
    ///
    /// Constructed eagerly while the graph is finalized, in dependency order,
    /// and released in reverse order when the registry is dropped.
    Singleton,
    /// One instance per unit of work
    ///
    /// Resolvable only through a `ServiceScope`; every scope constructs its
    /// own instance the first time it is asked for one.
    Scoped,
    /// New instance per resolution, never cached
    Transient,
}

impl Lifetime {
    pub const ALL: [Lifetime; 3] = [Lifetime::Singleton, Lifetime::Scoped, Lifetime::Transient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
