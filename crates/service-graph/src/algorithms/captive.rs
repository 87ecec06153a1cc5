//! Captive dependency detection
//!
//! A singleton outlives every scope, so it must not hold a scoped instance,
//! either directly or through transients it constructs.

use crate::domain::lifetime::Lifetime;
use std::collections::HashSet;

/// First `(singleton, scoped)` pair where the singleton reaches the scoped
/// node through transients only. Nodes are checked in index order.
pub fn find_captive(lifetimes: &[Lifetime], dependencies: &[Vec<usize>]) -> Option<(usize, usize)> {
    for (node, lifetime) in lifetimes.iter().enumerate() {
        if *lifetime != Lifetime::Singleton {
            continue;
        }
        let mut visited = HashSet::new();
        if let Some(scoped) = reach_scoped(node, lifetimes, dependencies, &mut visited) {
            return Some((node, scoped));
        }
    }
    None
}

fn reach_scoped(
    node: usize,
    lifetimes: &[Lifetime],
    dependencies: &[Vec<usize>],
    visited: &mut HashSet<usize>,
) -> Option<usize> {
    for &dep in &dependencies[node] {
        if !visited.insert(dep) {
            continue;
        }
        match lifetimes[dep] {
            Lifetime::Scoped => return Some(dep),
            Lifetime::Transient => {
                if let Some(scoped) = reach_scoped(dep, lifetimes, dependencies, visited) {
                    return Some(scoped);
                }
            }
            // Another singleton is checked on its own
            Lifetime::Singleton => {}
        }
    }
    None
}
