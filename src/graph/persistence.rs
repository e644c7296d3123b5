//! Graph persistence — the two pipeline artifacts.
//!
//! The record file is newline-delimited JSON, one object per line node,
//! written in graph insertion order. The snapshot is a bincode-encoded
//! structural dump that reloads into an identical [`LineGraph`]: same
//! node order, same attributes, same edge kinds.
//!
//! Writes are not atomic. A failure mid-write propagates immediately
//! and leaves the artifact in an undefined state.

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::builder::detect_definition;
use super::engine::LineGraph;
use super::types::{EdgeKind, LineNode, LineRecord};
use crate::error::Result;

/// On-disk form of the full graph.
///
/// Nodes are stored in insertion order; edges reference node positions
/// in that order. The definition index is not stored, it is rebuilt
/// deterministically from the node text on load.
#[derive(Debug, Serialize, Deserialize)]
struct GraphSnapshot {
    nodes: Vec<LineNode>,
    edges: Vec<(u32, u32, EdgeKind)>,
}

/// Write the JSONL record file: one object per node, build order.
pub fn write_records(graph: &LineGraph, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for node in graph.nodes() {
        let record = LineRecord::from_node(node);
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    info!(path = %path.display(), records = graph.stats().node_count, "record file written");
    Ok(())
}

/// Save the full graph structure to a binary snapshot.
pub fn save_snapshot(graph: &LineGraph, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let positions: HashMap<_, u32> = graph
        .node_order()
        .iter()
        .enumerate()
        .map(|(pos, &idx)| (idx, pos as u32))
        .collect();

    let snapshot = GraphSnapshot {
        nodes: graph.nodes().cloned().collect(),
        edges: graph
            .inner()
            .edge_references()
            .map(|edge| {
                (
                    positions[&edge.source()],
                    positions[&edge.target()],
                    edge.weight().kind,
                )
            })
            .collect(),
    };

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush()?;

    let stats = graph.stats();
    info!(
        path = %path.display(),
        nodes = stats.node_count,
        edges = stats.edge_count,
        "snapshot saved"
    );
    Ok(())
}

/// Load a snapshot back into a [`LineGraph`].
///
/// Reconstruction replays the nodes in stored order and re-detects
/// definitions from the node text, so the rebuilt definition index
/// matches the one the builder produced.
pub fn load_snapshot(path: &Path) -> Result<LineGraph> {
    let file = File::open(path)?;
    let snapshot: GraphSnapshot = bincode::deserialize_from(BufReader::new(file))?;

    let mut graph = LineGraph::new();
    let mut indexes = Vec::with_capacity(snapshot.nodes.len());

    for node in snapshot.nodes {
        let code = node.code.clone();
        let idx = graph.add_line(node);
        if let Some(name) = detect_definition(&code) {
            graph.record_definition(name, idx);
        }
        indexes.push(idx);
    }

    for (from, to, kind) in snapshot.edges {
        graph.add_edge(indexes[from as usize], indexes[to as usize], kind);
    }

    Ok(graph)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::SourceFile;
    use crate::graph::builder::build_graph;

    fn demo_graph() -> LineGraph {
        let files = vec![
            SourceFile {
                rel_path: "pkg/util.py".to_string(),
                lines: vec!["def foo():".to_string(), "    return 1".to_string()],
            },
            SourceFile {
                rel_path: "main.py".to_string(),
                lines: vec!["foo()".to_string()],
            },
        ];
        build_graph(&files)
    }

    #[test]
    fn records_are_one_json_object_per_line_in_order() {
        let graph = demo_graph();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/tags.jsonl");

        write_records(&graph, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: LineRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.node_id, "pkg/util.py:1");
        assert_eq!(first.code, "def foo():");

        let last: LineRecord = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last.node_id, "main.py:1");
        assert_eq!(last.lineno, 1);
    }

    #[test]
    fn snapshot_round_trip_preserves_structure() {
        let graph = demo_graph();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");

        save_snapshot(&graph, &path).unwrap();
        let reloaded = load_snapshot(&path).unwrap();

        assert_eq!(reloaded.stats(), graph.stats());

        let original_ids: Vec<String> = graph.nodes().map(|n| n.id()).collect();
        let reloaded_ids: Vec<String> = reloaded.nodes().map(|n| n.id()).collect();
        assert_eq!(reloaded_ids, original_ids);

        // Attributes survive.
        let idx = reloaded.index_of("pkg/util.py:2").unwrap();
        assert_eq!(reloaded.node(idx).code, "    return 1");

        // Edge kinds survive: the call edge is still a call edge.
        let caller = reloaded.index_of("main.py:1").unwrap();
        let def = reloaded.index_of("pkg/util.py:1").unwrap();
        assert!(reloaded
            .inner()
            .edges_connecting(caller, def)
            .any(|e| e.weight().kind == EdgeKind::Call));

        // The definition index is rebuilt from node text.
        assert_eq!(reloaded.definitions_of("foo").len(), 1);
    }

    #[test]
    fn load_missing_snapshot_is_io_error() {
        let err = load_snapshot(Path::new("/no/such/graph.bin")).unwrap_err();
        assert!(matches!(err, crate::error::RepoGraphError::Io(_)));
    }
}
