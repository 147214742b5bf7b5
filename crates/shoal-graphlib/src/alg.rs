//! Pure functions derived from a [`Graph`]: transposition and the
//! strongly-connected-components solver.

use rustc_hash::FxHashSet;

use crate::{AdjacencyView, Graph, NodeEntry};

/// Builds a new graph with the same node set (same insertion order) and every
/// edge `(u, v)` reversed to `(v, u)`.
pub fn transpose(graph: &Graph) -> Graph {
    let mut nodes: Vec<NodeEntry> = graph
        .nodes
        .iter()
        .map(|entry| NodeEntry {
            handle: entry.handle.clone(),
            out: Vec::new(),
        })
        .collect();
    for entry in &graph.nodes {
        for to in &entry.out {
            let Some(&to_idx) = graph.node_index.get(to.as_str()) else {
                continue;
            };
            nodes[to_idx].out.push(entry.handle.clone());
        }
    }
    Graph {
        nodes,
        node_index: graph.node_index.clone(),
    }
}

/// Partitions the node set into strongly connected components using
/// Kosaraju's two-pass algorithm.
///
/// Both passes are iterative over explicit stacks, so stack usage stays
/// bounded regardless of graph depth. Pass 1 walks the graph in node
/// insertion order and records a finishing order; pass 2 walks the transpose
/// in reverse finishing order, each unexplored start yielding exactly one
/// component. Components are returned in the order those pass-2 traversals
/// are initiated, which is what makes component numbering stable for a given
/// mutation history.
///
/// The solver never mutates its input; it reads through point-in-time
/// [`AdjacencyView`] snapshots.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<String>> {
    let adjacency = graph.adjacency_view();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut finished: FxHashSet<&str> = FxHashSet::default();
    let mut finishing_order: Vec<&str> = Vec::with_capacity(graph.node_count());

    for start in adjacency.nodes() {
        if !visited.contains(start) {
            depth_first_finish(
                &adjacency,
                start,
                &mut visited,
                &mut finished,
                &mut finishing_order,
            );
        }
    }

    let transposed = transpose(graph);
    let reverse_adjacency = transposed.adjacency_view();
    let mut explored: FxHashSet<&str> = FxHashSet::default();
    let mut components: Vec<Vec<String>> = Vec::new();

    for &start in finishing_order.iter().rev() {
        if explored.contains(start) {
            continue;
        }
        let mut component: Vec<String> = Vec::new();
        depth_first_collect(&reverse_adjacency, start, &mut explored, &mut component);
        components.push(component);
    }

    components
}

/// Iterative DFS producing a finishing order.
///
/// A node is appended to `finishing_order` the first time it is finalized;
/// the separate `finished` set guards against re-appending a node that the
/// explicit stack revisits.
fn depth_first_finish<'a>(
    adjacency: &'a AdjacencyView,
    start: &'a str,
    visited: &mut FxHashSet<&'a str>,
    finished: &mut FxHashSet<&'a str>,
    finishing_order: &mut Vec<&'a str>,
) {
    let mut stack: Vec<&'a str> = vec![start];
    while let Some(&current) = stack.last() {
        if visited.insert(current) {
            let mut pushed = false;
            for neighbor in adjacency.neighbors(current) {
                if !visited.contains(neighbor.as_str()) {
                    stack.push(neighbor.as_str());
                    pushed = true;
                }
            }
            if pushed {
                continue;
            }
        }
        let _ = stack.pop();
        if finished.insert(current) {
            finishing_order.push(current);
        }
    }
}

/// Iterative DFS over the transposed adjacency, collecting every node
/// reachable from `start` that has not been claimed by an earlier component.
fn depth_first_collect<'a>(
    adjacency: &'a AdjacencyView,
    start: &'a str,
    explored: &mut FxHashSet<&'a str>,
    component: &mut Vec<String>,
) {
    let mut stack: Vec<&'a str> = vec![start];
    while let Some(current) = stack.pop() {
        if !explored.insert(current) {
            continue;
        }
        component.push(current.to_string());
        for neighbor in adjacency.neighbors(current) {
            if !explored.contains(neighbor.as_str()) {
                stack.push(neighbor.as_str());
            }
        }
    }
}
