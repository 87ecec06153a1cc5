//! Domain invariants for the composition graph

use super::capability::CapabilityId;
use super::registration::Registration;
use std::collections::{HashMap, HashSet};

/// INVARIANT-1: Unique Capabilities
/// Each capability maps to at most one registration.
pub fn invariant_unique_capabilities(registrations: &[Registration]) -> bool {
    let mut seen = HashSet::new();
    registrations.iter().all(|r| seen.insert(r.capability))
}

/// INVARIANT-2: Topological Order
/// Every registration appears after all of its dependencies.
pub fn invariant_topological_order(order: &[CapabilityId], registrations: &[Registration]) -> bool {
    let position: HashMap<CapabilityId, usize> =
        order.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    if position.len() != registrations.len() {
        return false;
    }

    registrations.iter().all(|registration| {
        let Some(&own) = position.get(&registration.capability) else {
            return false;
        };
        registration
            .dependencies
            .iter()
            .all(|dep| position.get(dep).is_some_and(|&p| p < own))
    })
}

/// INVARIANT-3: No Cycles
/// The dependency graph is a DAG.
pub fn invariant_no_cycles(registrations: &[Registration]) -> bool {
    let edges: HashMap<CapabilityId, &[CapabilityId]> = registrations
        .iter()
        .map(|r| (r.capability, r.dependencies.as_slice()))
        .collect();

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();

    for registration in registrations {
        if has_cycle_dfs(&edges, registration.capability, &mut visited, &mut rec_stack) {
            return false;
        }
    }

    true
}

fn has_cycle_dfs(
    edges: &HashMap<CapabilityId, &[CapabilityId]>,
    node: CapabilityId,
    visited: &mut HashSet<CapabilityId>,
    rec_stack: &mut HashSet<CapabilityId>,
) -> bool {
    if rec_stack.contains(&node) {
        return true;
    }

    if !visited.insert(node) {
        return false;
    }

    rec_stack.insert(node);
    if let Some(neighbors) = edges.get(&node) {
        for &neighbor in neighbors.iter() {
            if has_cycle_dfs(edges, neighbor, visited, rec_stack) {
                return true;
            }
        }
    }
    rec_stack.remove(&node);

    false
}
