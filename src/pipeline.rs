//! The end-to-end pipeline: collect, build, persist, sample.
//!
//! Strictly sequential; each stage consumes the previous stage's
//! output and any failure aborts the run. The whole graph is held in
//! memory for the lifetime of one run.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::collect::{collect_files, read_source, SourceFile};
use crate::config::RepoGraphConfig;
use crate::error::Result;
use crate::graph::{
    build_line_graph, ego_neighborhood, link_calls, save_snapshot, write_records, GraphStats,
    LineGraph, Neighborhood,
};

/// What one pipeline run produced.
#[derive(Debug)]
pub struct PipelineReport {
    /// Number of source files collected.
    pub file_count: usize,
    /// Graph size after nodes and sequential edges.
    pub stats_before_calls: GraphStats,
    /// Graph size after the call-edge pass.
    pub stats_after_calls: GraphStats,
    /// Where the JSONL records were written.
    pub records_path: PathBuf,
    /// Where the binary snapshot was written.
    pub snapshot_path: PathBuf,
    /// Source text of the chosen center node.
    pub center_code: String,
    /// The sampled ego neighborhood around the default center.
    pub neighborhood: Neighborhood,
}

/// Run the full pipeline rooted at `base` with the given config.
///
/// The sampling center is the first node in graph insertion order, the
/// first line of the first collected file. Callers that need a
/// meaningful center should use [`ego_neighborhood`] directly on the
/// built or reloaded graph.
pub fn run(config: &RepoGraphConfig, base: &Path) -> Result<PipelineReport> {
    let root = config.resolve_root(base);
    let files = collect_files(&root, &config.project.extension)?;
    let file_count = files.len();

    let sources: Vec<SourceFile> = files
        .iter()
        .map(|path| read_source(&root, path))
        .collect::<Result<_>>()?;

    let mut graph = build_line_graph(&sources);
    let stats_before_calls = graph.stats();

    link_calls(&mut graph);
    let stats_after_calls = graph.stats();

    let records_path = config.records_path(base);
    let snapshot_path = config.snapshot_path(base);
    write_records(&graph, &records_path)?;
    save_snapshot(&graph, &snapshot_path)?;

    let (center_code, neighborhood) =
        sample_default_center(&graph, config.sample.radius)?;

    info!(
        files = file_count,
        nodes = stats_after_calls.node_count,
        edges = stats_after_calls.edge_count,
        "pipeline run complete"
    );

    Ok(PipelineReport {
        file_count,
        stats_before_calls,
        stats_after_calls,
        records_path,
        snapshot_path,
        center_code,
        neighborhood,
    })
}

/// Sample around the positional default center.
fn sample_default_center(graph: &LineGraph, radius: usize) -> Result<(String, Neighborhood)> {
    // Collection already rejected empty repositories, but every file
    // could still be empty, leaving no nodes to center on.
    let center_idx = match graph.node_order().first() {
        Some(&idx) => idx,
        None => {
            return Err(crate::error::RepoGraphError::NodeNotFound(
                "<empty graph>".to_string(),
            ))
        }
    };
    let center = graph.node(center_idx).id();
    let center_code = graph.node(center_idx).code.clone();
    let neighborhood = ego_neighborhood(graph, &center, radius)?;
    Ok((center_code, neighborhood))
}
