//! Line graph module — the structural backbone of repograph.
//!
//! Provides the graph data model, engine, construction passes,
//! persistence, and neighborhood sampling.

pub mod builder;
pub mod engine;
pub mod persistence;
pub mod sample;
pub mod types;

pub use builder::{build_graph, build_line_graph, link_calls};
pub use engine::LineGraph;
pub use persistence::{load_snapshot, save_snapshot, write_records};
pub use sample::{ego_neighborhood, Neighborhood};
pub use types::{EdgeData, EdgeKind, GraphStats, LineNode, LineRecord};
