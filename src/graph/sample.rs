//! Ego-neighborhood sampling.
//!
//! Extracts the induced subgraph of all nodes within a bounded hop
//! distance of a center node, treating edges as undirected for
//! reachability. The reported size ratio is advisory telemetry, not an
//! input to any decision.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};

use super::engine::LineGraph;
use crate::error::{RepoGraphError, Result};

/// The induced subgraph around a center node.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    /// Identifier of the center node.
    pub center: String,
    /// Hop radius used for the extraction.
    pub radius: usize,
    /// Identifiers of the kept nodes, in graph insertion order.
    pub node_ids: Vec<String>,
    /// Number of edges with both endpoints inside the neighborhood.
    pub edge_count: usize,
    /// Node count of the full graph, for the ratio.
    pub total_nodes: usize,
}

impl Neighborhood {
    /// Subgraph node count.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Fraction of the full graph kept in the neighborhood.
    pub fn ratio(&self) -> f64 {
        if self.total_nodes == 0 {
            0.0
        } else {
            self.node_count() as f64 / self.total_nodes as f64
        }
    }
}

/// Extract the ego neighborhood of `center` within `radius` hops.
///
/// Edges are traversed regardless of direction. Radius 0 yields the
/// center alone. Fails with [`RepoGraphError::NodeNotFound`] before any
/// traversal if `center` is not in the graph.
pub fn ego_neighborhood(graph: &LineGraph, center: &str, radius: usize) -> Result<Neighborhood> {
    let start = graph
        .index_of(center)
        .ok_or_else(|| RepoGraphError::NodeNotFound(center.to_string()))?;

    // Undirected BFS out to the radius.
    let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    depth.insert(start, 0);
    queue.push_back(start);

    while let Some(idx) = queue.pop_front() {
        let d = depth[&idx];
        if d == radius {
            continue;
        }
        for neighbor in graph.inner().neighbors_undirected(idx) {
            if !depth.contains_key(&neighbor) {
                depth.insert(neighbor, d + 1);
                queue.push_back(neighbor);
            }
        }
    }

    let kept: HashSet<NodeIndex> = depth.keys().copied().collect();

    let node_ids: Vec<String> = graph
        .node_order()
        .iter()
        .copied()
        .filter(|idx| kept.contains(idx))
        .map(|idx| graph.node(idx).id())
        .collect();

    let edge_count = graph
        .inner()
        .edge_references()
        .filter(|edge| kept.contains(&edge.source()) && kept.contains(&edge.target()))
        .count();

    Ok(Neighborhood {
        center: center.to_string(),
        radius,
        node_ids,
        edge_count,
        total_nodes: graph.stats().node_count,
    })
}
