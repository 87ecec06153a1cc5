//! Cycle naming
//!
//! Kahn's algorithm only tells us that a cycle exists. A depth-first search
//! from the unscheduled nodes recovers one concrete cycle to report.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// First cycle reachable from `starts`, as a closed path `[a, b, ..., a]`.
pub fn find_cycle(dependencies: &[Vec<usize>], starts: &[usize]) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; dependencies.len()];
    let mut path = Vec::new();

    for &start in starts {
        if marks[start] == Mark::Unvisited {
            if let Some(cycle) = visit(start, dependencies, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit(
    node: usize,
    dependencies: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Mark::OnPath;
    path.push(node);

    for &next in &dependencies[node] {
        match marks[next] {
            Mark::OnPath => {
                // Back edge: the cycle is the path suffix starting at `next`
                let start = path.iter().position(|&n| n == next)?;
                let mut cycle = path[start..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = visit(next, dependencies, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    None
}
