//! Configuration for a repograph run.
//!
//! The scan root, the file filter, and the artifact locations are all
//! explicit configuration. Nothing is hardcoded and there is no
//! process-wide state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level repograph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoGraphConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sample: SampleConfig,
}

/// What to scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root directory to scan (relative to the config file's directory).
    #[serde(default = "default_root")]
    pub root: String,
    /// File extension to collect (without the dot).
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Where the artifacts go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for pipeline artifacts.
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// File name for the per-line JSONL records.
    #[serde(default = "default_records")]
    pub records: String,
    /// File name for the binary graph snapshot.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

/// Neighborhood sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Hop radius for the ego neighborhood.
    #[serde(default = "default_radius")]
    pub radius: usize,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    "py".to_string()
}

fn default_output_dir() -> String {
    "repo_structures".to_string()
}

fn default_records() -> String {
    "tags_simple.jsonl".to_string()
}

fn default_snapshot() -> String {
    "simple_graph.bin".to_string()
}

fn default_radius() -> usize {
    2
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            records: default_records(),
            snapshot: default_snapshot(),
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

impl RepoGraphConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Resolve the scan root relative to a base directory.
    pub fn resolve_root(&self, base: &Path) -> PathBuf {
        base.join(&self.project.root)
    }

    /// Resolve the artifact directory relative to a base directory.
    pub fn resolve_output_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.output.dir)
    }

    /// Path of the JSONL record file inside the artifact directory.
    pub fn records_path(&self, base: &Path) -> PathBuf {
        self.resolve_output_dir(base).join(&self.output.records)
    }

    /// Path of the binary snapshot inside the artifact directory.
    pub fn snapshot_path(&self, base: &Path) -> PathBuf {
        self.resolve_output_dir(base).join(&self.output.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_artifact_layout() {
        let config = RepoGraphConfig::default();
        assert_eq!(config.project.extension, "py");
        assert_eq!(config.output.dir, "repo_structures");
        assert_eq!(config.output.records, "tags_simple.jsonl");
        assert_eq!(config.sample.radius, 2);
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repograph.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "[project]\nroot = \"mini_repo\"\n").unwrap();

        let config = RepoGraphConfig::load(&path);
        assert_eq!(config.project.root, "mini_repo");
        assert_eq!(config.project.extension, "py");
        assert_eq!(config.output.snapshot, "simple_graph.bin");
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let config = RepoGraphConfig::load(Path::new("/does/not/exist.toml"));
        assert_eq!(config.project.root, ".");
    }

    #[test]
    fn paths_resolve_under_base() {
        let config = RepoGraphConfig::default();
        let base = Path::new("/work");
        assert_eq!(
            config.records_path(base),
            Path::new("/work/repo_structures/tags_simple.jsonl")
        );
        assert_eq!(
            config.snapshot_path(base),
            Path::new("/work/repo_structures/simple_graph.bin")
        );
    }
}
