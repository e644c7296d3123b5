//! Line graph construction.
//!
//! Two passes over the collected sources. The first pass creates one
//! node per physical line, chains consecutive lines of the same file
//! with `next_line` edges, and records function definitions. The second
//! pass checks every node against every known function name and adds
//! `call` edges from call-site lines to every recorded definition of
//! the called name.
//!
//! Call detection is textual, not semantic: a line "calls" `foo` when
//! it contains the substring `foo(` and is not itself a `def foo(`
//! line. String literals mentioning `foo(` produce false positives;
//! calls split across lines, method calls, and aliased imports are
//! missed. That rough approximation is the intended behavior of the
//! tool, and a name with several definitions fans out to all of them.

use petgraph::graph::NodeIndex;
use tracing::{debug, info};

use super::engine::LineGraph;
use super::types::{EdgeKind, LineNode};
use crate::collect::SourceFile;

/// Build the full line graph: nodes, sequential edges, and call edges.
pub fn build_graph(files: &[SourceFile]) -> LineGraph {
    let mut graph = build_line_graph(files);
    link_calls(&mut graph);
    graph
}

/// First pass: nodes, `next_line` edges, and the definition index.
///
/// Files are never chained to each other; the first line of each file
/// has no incoming `next_line` edge.
pub fn build_line_graph(files: &[SourceFile]) -> LineGraph {
    let mut graph = LineGraph::new();

    for file in files {
        let mut prev: Option<NodeIndex> = None;

        for (offset, code) in file.lines.iter().enumerate() {
            let lineno = offset + 1;
            let idx = graph.add_line(LineNode::new(file.rel_path.clone(), lineno, code.clone()));

            if let Some(prev_idx) = prev {
                graph.add_edge(prev_idx, idx, EdgeKind::NextLine);
            }
            prev = Some(idx);

            if let Some(name) = detect_definition(code) {
                debug!(name, node = %graph.node(idx).id(), "recorded function definition");
                graph.record_definition(name, idx);
            }
        }
    }

    let stats = graph.stats();
    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        files = files.len(),
        "line graph built"
    );
    graph
}

/// Second pass: add heuristic `call` edges.
///
/// Every node is checked against every known function name. A node
/// whose stripped text starts with the exact `def NAME(` prefix is
/// skipped for that name, so a definition never points at itself.
pub fn link_calls(graph: &mut LineGraph) {
    let patterns: Vec<(String, String, Vec<NodeIndex>)> = graph
        .definitions()
        .map(|(name, defs)| (format!("def {name}("), format!("{name}("), defs.clone()))
        .collect();

    let order: Vec<NodeIndex> = graph.node_order().to_vec();
    let mut added = 0usize;

    for idx in order {
        let code = graph.node(idx).code.clone();
        let stripped = code.trim();

        for (def_prefix, call_pattern, def_nodes) in &patterns {
            if stripped.starts_with(def_prefix.as_str()) {
                continue;
            }
            if code.contains(call_pattern.as_str()) {
                for &def_idx in def_nodes {
                    if graph.add_edge(idx, def_idx, EdgeKind::Call) {
                        added += 1;
                    }
                }
            }
        }
    }

    info!(call_edges = added, "call edges linked");
}

/// Detect a function definition: `def NAME(` with only leading
/// whitespace skipped, where NAME is an identifier. Returns the name.
pub(crate) fn detect_definition(code: &str) -> Option<&str> {
    let rest = code.trim_start().strip_prefix("def ")?;

    let mut end = 0;
    for (i, c) in rest.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        return None;
    }

    let (name, tail) = rest.split_at(end);
    tail.starts_with('(').then_some(name)
}
