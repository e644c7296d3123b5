//! repograph CLI - build, inspect, and sample the line graph.

use clap::{Parser, Subcommand};
use repograph::{ego_neighborhood, load_snapshot, pipeline, RepoGraphConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repograph")]
#[command(about = "repograph - line-level code graphs with ego sampling", long_about = None)]
struct Cli {
    /// Base directory for config resolution (default: current directory)
    #[arg(short, long, default_value = ".")]
    base: PathBuf,

    /// Config file (TOML), relative to the base directory
    #[arg(short, long, default_value = "repograph.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: collect, build, persist, sample
    Build,

    /// Sample an ego neighborhood from a saved snapshot
    Sample {
        /// Center node id (file:lineno); default: first node
        #[arg(short, long)]
        node: Option<String>,

        /// Hop radius (default: from config)
        #[arg(short, long)]
        radius: Option<usize>,
    },

    /// Show node/edge counts of a saved snapshot
    Stats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> repograph::Result<()> {
    let config = RepoGraphConfig::load(&cli.base.join(&cli.config));

    match cli.command {
        Commands::Build => {
            let report = pipeline::run(&config, &cli.base)?;

            println!("✓ Found {} source files", report.file_count);
            println!(
                "✓ Graph built: nodes = {}, edges = {}",
                report.stats_before_calls.node_count, report.stats_before_calls.edge_count
            );
            println!(
                "✓ After call edges: nodes = {}, edges = {}",
                report.stats_after_calls.node_count, report.stats_after_calls.edge_count
            );
            println!("✓ Records:  {}", report.records_path.display());
            println!("✓ Snapshot: {}", report.snapshot_path.display());
            println!();
            println!(
                "Center node: {} => {}",
                report.neighborhood.center, report.center_code
            );
            print_neighborhood(&report.neighborhood);
        }

        Commands::Sample { node, radius } => {
            let graph = load_snapshot(&config.snapshot_path(&cli.base))?;
            let center = match node {
                Some(id) => id,
                None => graph
                    .first_node_id()
                    .ok_or_else(|| repograph::RepoGraphError::NodeNotFound("<empty graph>".to_string()))?,
            };
            let radius = radius.unwrap_or(config.sample.radius);

            let hood = ego_neighborhood(&graph, &center, radius)?;
            println!("Center node: {}", hood.center);
            print_neighborhood(&hood);
        }

        Commands::Stats => {
            let graph = load_snapshot(&config.snapshot_path(&cli.base))?;
            let stats = graph.stats();
            println!("Nodes: {}", stats.node_count);
            println!("Edges: {}", stats.edge_count);
        }
    }

    Ok(())
}

fn print_neighborhood(hood: &repograph::Neighborhood) {
    println!("Full graph nodes: {}", hood.total_nodes);
    println!(
        "{}-hop subgraph nodes: {} ({:.2}%)",
        hood.radius,
        hood.node_count(),
        hood.ratio() * 100.0
    );
}
