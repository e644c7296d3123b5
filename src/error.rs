//! Error types for repograph.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RepoGraphError>;

/// All failure modes of the pipeline.
///
/// There is no local recovery anywhere: every variant aborts the stage
/// that produced it. I/O and serialization failures are propagated
/// unmodified. A failure while writing an artifact leaves that artifact
/// in an undefined state.
#[derive(Debug, Error)]
pub enum RepoGraphError {
    /// The configured scan root does not exist.
    #[error("repository path not found: {0}")]
    PathNotFound(PathBuf),

    /// The scan root exists but contains no matching source files.
    #[error("no matching source files under {0}")]
    EmptyRepository(PathBuf),

    /// A sampling center was requested that is not in the graph.
    #[error("node not found in graph: {0}")]
    NodeNotFound(String),

    /// Underlying file system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record file (JSONL) serialization error.
    #[error("record serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph snapshot encode/decode error.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
