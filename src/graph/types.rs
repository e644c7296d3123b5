//! Core data types for the line graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One graph vertex: a single physical source line.
///
/// Created exactly once per line, never mutated afterwards. The node
/// identifier is derived, not stored: `"{file}:{lineno}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineNode {
    /// Owning file, relative to the scan root, forward-slash normalized.
    pub file: String,
    /// 1-based line number within the file.
    pub lineno: usize,
    /// Raw line text with the trailing newline stripped.
    pub code: String,
}

impl LineNode {
    pub fn new(file: impl Into<String>, lineno: usize, code: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            lineno,
            code: code.into(),
        }
    }

    /// The globally unique node identifier: `file:lineno`.
    ///
    /// Unique as long as relative paths are unique, which holds for a
    /// proper file-system tree.
    pub fn id(&self) -> String {
        format!("{}:{}", self.file, self.lineno)
    }
}

/// The two edge flavors of the line graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Consecutive lines within the same file, modeling textual order.
    NextLine,
    /// Heuristic edge from a line mentioning `name(` to a recorded
    /// definition line of `name`.
    Call,
}

impl EdgeKind {
    /// The wire label used in serialized artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::NextLine => "next_line",
            EdgeKind::Call => "call",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge payload. Only the kind for now; kept as a struct so edge
/// attributes can grow without touching the graph shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl EdgeData {
    pub fn new(kind: EdgeKind) -> Self {
        Self { kind }
    }
}

/// One line of the JSONL record artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub node_id: String,
    pub file: String,
    pub lineno: usize,
    pub code: String,
}

impl LineRecord {
    pub fn from_node(node: &LineNode) -> Self {
        Self {
            node_id: node.id(),
            file: node.file.clone(),
            lineno: node.lineno,
            code: node.code.clone(),
        }
    }
}

/// Node and edge counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_joins_path_and_lineno() {
        let node = LineNode::new("pkg/mod.py", 7, "x = 1");
        assert_eq!(node.id(), "pkg/mod.py:7");
    }

    #[test]
    fn edge_kind_wire_labels() {
        assert_eq!(EdgeKind::NextLine.as_str(), "next_line");
        assert_eq!(EdgeKind::Call.as_str(), "call");
        assert_eq!(
            serde_json::to_string(&EdgeKind::NextLine).unwrap(),
            "\"next_line\""
        );
    }

    #[test]
    fn record_serializes_with_expected_shape() {
        let node = LineNode::new("main.py", 1, "def foo():");
        let record = LineRecord::from_node(&node);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["node_id"], "main.py:1");
        assert_eq!(json["file"], "main.py");
        assert_eq!(json["lineno"], 1);
        assert_eq!(json["code"], "def foo():");
    }
}
