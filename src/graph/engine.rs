//! The line graph engine — nodes, edges, and lookup indexes.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::{EdgeData, EdgeKind, GraphStats, LineNode};

/// The line-level code graph for one repository scan.
///
/// Owned by the builder during construction; afterwards the serializer
/// and sampler only read it. Per edge kind the graph is a simple
/// directed graph: re-adding an existing edge is a no-op, while edges
/// of different kinds between the same pair coexist.
#[derive(Debug, Clone, Default)]
pub struct LineGraph {
    /// The directed graph storing one node per source line.
    pub(crate) graph: DiGraph<LineNode, EdgeData>,
    /// Index: node identifier -> node index.
    pub(crate) node_index: HashMap<String, NodeIndex>,
    /// Node indexes in insertion order (file order, then line order).
    /// This is the iteration order the serializer and sampler assume.
    pub(crate) order: Vec<NodeIndex>,
    /// Index: function name -> definition nodes, in encounter order.
    /// A name may have several definitions; all are kept.
    pub(crate) def_index: HashMap<String, Vec<NodeIndex>>,
}

impl LineGraph {
    /// Create a new empty line graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Add a line node. Returns the node index.
    ///
    /// Each physical line is added exactly once; a second add of the
    /// same identifier returns the existing index unchanged.
    pub fn add_line(&mut self, node: LineNode) -> NodeIndex {
        let id = node.id();
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        self.order.push(idx);
        idx
    }

    /// Record a function definition at the given node.
    pub fn record_definition(&mut self, name: &str, idx: NodeIndex) {
        self.def_index.entry(name.to_string()).or_default().push(idx);
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Add an edge, idempotently per kind. Returns true if inserted.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) -> bool {
        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|edge| edge.weight().kind == kind);
        if exists {
            return false;
        }
        self.graph.add_edge(from, to, EdgeData::new(kind));
        true
    }

    // ─── Lookup ─────────────────────────────────────────────────

    /// Resolve a node identifier to its index.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Whether the graph contains the given node identifier.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// The node payload at an index.
    pub fn node(&self, idx: NodeIndex) -> &LineNode {
        &self.graph[idx]
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &LineNode> {
        self.order.iter().map(|&idx| &self.graph[idx])
    }

    /// Node indexes in insertion order.
    pub fn node_order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Identifier of the first node in insertion order, if any.
    ///
    /// This is the default sampling center: the first line of the first
    /// collected file. Purely positional, not semantically meaningful.
    pub fn first_node_id(&self) -> Option<String> {
        self.order.first().map(|&idx| self.graph[idx].id())
    }

    /// Names in the definition index, with their definition nodes.
    pub fn definitions(&self) -> impl Iterator<Item = (&String, &Vec<NodeIndex>)> {
        self.def_index.iter()
    }

    /// Definition nodes recorded for a function name.
    pub fn definitions_of(&self, name: &str) -> &[NodeIndex] {
        self.def_index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current node and edge counts.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }

    /// Access the underlying petgraph (for traversal and serialization).
    pub(crate) fn inner(&self) -> &DiGraph<LineNode, EdgeData> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(file: &str, lineno: usize, code: &str) -> LineNode {
        LineNode::new(file, lineno, code)
    }

    #[test]
    fn empty_graph() {
        let graph = LineGraph::new();
        let stats = graph.stats();
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(graph.first_node_id(), None);
    }

    #[test]
    fn add_line_is_idempotent_per_id() {
        let mut graph = LineGraph::new();
        let a = graph.add_line(node("a.py", 1, "x = 1"));
        let b = graph.add_line(node("a.py", 1, "x = 1"));
        assert_eq!(a, b);
        assert_eq!(graph.stats().node_count, 1);
    }

    #[test]
    fn duplicate_edge_same_kind_is_ignored() {
        let mut graph = LineGraph::new();
        let a = graph.add_line(node("a.py", 1, "def foo():"));
        let b = graph.add_line(node("a.py", 2, "foo()"));

        assert!(graph.add_edge(a, b, EdgeKind::NextLine));
        assert!(!graph.add_edge(a, b, EdgeKind::NextLine));
        assert_eq!(graph.stats().edge_count, 1);
    }

    #[test]
    fn different_kinds_between_same_pair_coexist() {
        let mut graph = LineGraph::new();
        let a = graph.add_line(node("a.py", 1, "def foo():"));
        let b = graph.add_line(node("a.py", 2, "foo()"));

        assert!(graph.add_edge(b, a, EdgeKind::Call));
        assert!(graph.add_edge(b, a, EdgeKind::NextLine));
        assert!(!graph.add_edge(b, a, EdgeKind::Call));
        assert_eq!(graph.stats().edge_count, 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut graph = LineGraph::new();
        graph.add_line(node("b.py", 1, "first"));
        graph.add_line(node("a.py", 1, "second"));
        graph.add_line(node("a.py", 2, "third"));

        let ids: Vec<String> = graph.nodes().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["b.py:1", "a.py:1", "a.py:2"]);
        assert_eq!(graph.first_node_id().unwrap(), "b.py:1");
    }

    #[test]
    fn definition_index_keeps_duplicates_in_order() {
        let mut graph = LineGraph::new();
        let a = graph.add_line(node("a.py", 1, "def foo():"));
        let b = graph.add_line(node("b.py", 5, "def foo():"));
        graph.record_definition("foo", a);
        graph.record_definition("foo", b);

        assert_eq!(graph.definitions_of("foo"), &[a, b]);
        assert!(graph.definitions_of("bar").is_empty());
    }
}
