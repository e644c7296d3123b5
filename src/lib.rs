//! # repograph
//!
//! Line-level code graph construction and neighborhood sampling.
//!
//! repograph scans a source tree, builds a directed graph with one node
//! per physical source line, links consecutive lines with `next_line`
//! edges, and adds heuristic `call` edges from call-site lines to
//! function-definition lines. The graph is persisted as a JSONL record
//! file plus a binary snapshot, and a bounded-radius ego neighborhood
//! around a center node reports how small a local slice of the
//! repository is relative to the whole.
//!
//! The call edges are a deliberate textual approximation (substring
//! matching, no AST): good enough for rough structural context, not a
//! precise call graph.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use repograph::{pipeline, RepoGraphConfig};
//!
//! let config = RepoGraphConfig::default();
//! let report = pipeline::run(&config, Path::new(".")).unwrap();
//!
//! println!(
//!     "{} files, {} nodes, {} edges",
//!     report.file_count,
//!     report.stats_after_calls.node_count,
//!     report.stats_after_calls.edge_count,
//! );
//! ```

pub mod collect;
pub mod config;
pub mod error;
pub mod graph;
pub mod pipeline;

// Re-exports for convenience
pub use collect::{collect_files, read_source, SourceFile};
pub use config::RepoGraphConfig;
pub use error::{RepoGraphError, Result};
pub use graph::{
    build_graph, ego_neighborhood, load_snapshot, save_snapshot, write_records, EdgeKind,
    GraphStats, LineGraph, LineNode, LineRecord, Neighborhood,
};
pub use pipeline::PipelineReport;
