//! Kahn's Topological Sort Algorithm
//!
//! O(V + E). Nodes are registration indices; `dependencies[n]` lists the
//! nodes `n` needs constructed first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Construction order, dependencies first.
///
/// Among nodes that are ready at the same time the lowest index (earliest
/// registration) goes first, so the order is deterministic. On failure the
/// unscheduled nodes are returned in ascending order; every one of them is
/// on or behind a cycle.
pub fn topological_order(dependencies: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let node_count = dependencies.len();

    // 1. In-degree = number of unmet dependencies; reverse adjacency = dependents
    let mut in_degree: Vec<usize> = dependencies.iter().map(Vec::len).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (node, deps) in dependencies.iter().enumerate() {
        for &dep in deps {
            dependents[dep].push(node);
        }
    }

    // 2. Min-heap of ready nodes
    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(node, _)| Reverse(node))
        .collect();

    // 3. Schedule
    let mut order = Vec::with_capacity(node_count);
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for &dependent in &dependents[node] {
            let degree = &mut in_degree[dependent];
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    // 4. Anything left has an unmet dependency that can never be met
    if order.len() < node_count {
        let unscheduled = (0..node_count).filter(|n| in_degree[*n] > 0).collect();
        return Err(unscheduled);
    }

    Ok(order)
}
