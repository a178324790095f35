//! Cycle detection over the candidate prerequisite graph.
//!
//! # Edge Direction
//!
//! The candidate set induces a directed graph with edge `course → prereq`
//! ("course requires prerequisite"). Any cycle along those edges is a
//! dependency loop no schedule can satisfy, so every identifier on a
//! detected cycle path is excluded from insertion wholesale — the record is
//! dropped, not merely stripped of the offending edge.
//!
//! # Algorithm
//!
//! Three-coloring depth-first search: white = unvisited, gray = on the
//! current traversal path, black = resolved acyclic. An edge into a gray
//! node is a back-edge; the cycle path is rebuilt from recorded predecessor
//! links as `target → … → current → target`. Every back-edge is reported as
//! one cycle and the traversal continues, restarting from every still-white
//! node in admission order until all nodes are black — disjoint and
//! overlapping cycles alike are found in one O(V+E) pass. Self-loops cannot
//! reach this scan: self-edges were already pruned by the validator.
//!
//! The traversal uses an explicit frame stack instead of recursion, so stack
//! usage is bounded regardless of graph depth. Color and predecessor maps
//! are scoped to a single scan; nothing persists between loads.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::candidates::CandidateSet;

/// Result of one cycle scan.
#[derive(Debug, Default)]
pub struct CycleScan {
    /// One entry per discovered cycle: identifiers in traversal order,
    /// starting and ending at the back-edge target (`B → C → D → B`).
    pub paths: Vec<Vec<String>>,
    /// Every identifier appearing on any cycle path. Members are dropped
    /// from insertion entirely.
    pub excluded: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Scan the candidate set for prerequisite cycles.
#[must_use]
#[instrument(skip(candidates), fields(candidates = candidates.len()))]
pub fn scan(candidates: &CandidateSet) -> CycleScan {
    let graph = build_graph(candidates);

    let mut color = vec![Color::White; graph.node_count()];
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut result = CycleScan::default();

    // Nodes were added in admission order, so index order is file order.
    for root in graph.node_indices() {
        if color[root.index()] != Color::White {
            continue;
        }
        visit_from(&graph, root, &mut color, &mut parent, &mut result);
    }

    if !result.paths.is_empty() {
        debug!(
            cycles = result.paths.len(),
            excluded = result.excluded.len(),
            "prerequisite cycles detected"
        );
    }

    result
}

/// Build the directed prerequisite graph, one node per candidate in
/// admission order. Pruning already removed unknown targets, so every edge
/// endpoint resolves to a node.
fn build_graph(candidates: &CandidateSet) -> DiGraph<String, ()> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(candidates.len());

    for course in candidates.iter() {
        let idx = graph.add_node(course.identifier.clone());
        node_map.insert(course.identifier.clone(), idx);
    }

    for course in candidates.iter() {
        let Some(&from) = node_map.get(&course.identifier) else {
            continue;
        };
        for prereq in &course.prerequisites {
            let Some(&to) = node_map.get(prereq) else {
                continue;
            };
            if !graph.contains_edge(from, to) {
                graph.add_edge(from, to, ());
            }
        }
    }

    graph
}

/// Iterative DFS from one root. Every back-edge encountered is recorded as
/// one cycle; the traversal then continues, so all nodes under this root
/// end black and no cycle reachable from it goes unseen. Any cycle contains
/// at least one back-edge, so excluding the reconstructed paths leaves the
/// surviving graph acyclic.
fn visit_from(
    graph: &DiGraph<String, ()>,
    root: NodeIndex,
    color: &mut [Color],
    parent: &mut HashMap<NodeIndex, NodeIndex>,
    result: &mut CycleScan,
) {
    // Each frame: (node, outgoing neighbors in edge-insertion order, cursor).
    let mut frames: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

    color[root.index()] = Color::Gray;
    frames.push((root, out_neighbors(graph, root), 0));

    while let Some(frame) = frames.last_mut() {
        let current = frame.0;

        if frame.2 < frame.1.len() {
            let next = frame.1[frame.2];
            frame.2 += 1;

            match color[next.index()] {
                Color::White => {
                    parent.insert(next, current);
                    color[next.index()] = Color::Gray;
                    let neighbors = out_neighbors(graph, next);
                    frames.push((next, neighbors, 0));
                }
                Color::Gray => {
                    // Back-edge: `next` is an ancestor on the current path.
                    let path = reconstruct_path(graph, current, next, parent);
                    result.excluded.extend(path.iter().cloned());
                    result.paths.push(path);
                }
                Color::Black => {} // already resolved acyclic from there
            }
        } else {
            color[current.index()] = Color::Black;
            frames.pop();
        }
    }
}

/// Outgoing neighbors in edge-insertion order (petgraph iterates newest
/// edge first, so the raw order is reversed).
fn out_neighbors(graph: &DiGraph<String, ()>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
    neighbors.reverse();
    neighbors
}

/// Rebuild the cycle path for a back-edge `current → target`.
///
/// Gray nodes are exactly the root-to-current traversal path, so walking
/// predecessor links from `current` always reaches `target` — including
/// when `target` is the DFS root itself, which has no predecessor entry.
fn reconstruct_path(
    graph: &DiGraph<String, ()>,
    current: NodeIndex,
    target: NodeIndex,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> Vec<String> {
    let mut indices = vec![current];
    let mut cursor = current;
    while cursor != target {
        let Some(&pred) = parent.get(&cursor) else {
            break;
        };
        cursor = pred;
        indices.push(pred);
    }
    indices.reverse();
    indices.push(target);

    indices.into_iter().map(|idx| node_label(graph, idx)).collect()
}

fn node_label(graph: &DiGraph<String, ()>, idx: NodeIndex) -> String {
    graph
        .node_weight(idx)
        .cloned()
        .unwrap_or_else(|| format!("#{}", idx.index()))
}
