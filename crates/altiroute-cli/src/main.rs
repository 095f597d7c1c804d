use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use altiroute_cli::output::OutputFormat;

mod commands;

use commands::data::DataOptions;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "All-pairs shortest routes and elevation gain over a road network"
)]
struct Cli {
    /// Directory holding cols.csv, towns.csv and roads.csv.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Location file (`name;elevation`); may be repeated. Overrides the
    /// location files found in the data directory.
    #[arg(long = "locations", global = true)]
    locations: Vec<PathBuf>,

    /// Edge file (`from;to;weight`). Overrides roads.csv.
    #[arg(long, global = true)]
    edges: Option<PathBuf>,

    /// Matrix capacity: graphs with more locations are refused.
    #[arg(long, global = true)]
    max_nodes: Option<usize>,

    /// Upper bound on relaxation work (locations cubed).
    #[arg(long, global = true)]
    budget: Option<u64>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every location with its index and elevation.
    Locations,
    /// Shortest route between two named locations with its elevation gain.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
    },
    /// Print the converged distance (or predecessor) table.
    Matrix {
        /// Show the predecessor table instead of distances.
        #[arg(long)]
        predecessors: bool,
    },
    /// List every reachable destination with its cost and route.
    Paths {
        /// Only list destinations reachable from this location.
        #[arg(long = "from")]
        from: Option<String>,
    },
    /// Generate a random graph and solve it.
    Demo {
        /// Number of generated locations.
        #[arg(long, default_value_t = 10)]
        nodes: usize,
        /// Seed for a reproducible graph.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    let data = DataOptions {
        data_dir: cli.data_dir,
        locations: cli.locations,
        edges: cli.edges,
        max_nodes: cli.max_nodes,
        budget: cli.budget,
    };

    match cli.command {
        Command::Locations => commands::locations::handle_locations(&data, cli.format),
        Command::Route { from, to } => {
            commands::route::handle_route(&data, cli.format, &from, &to, started)
        }
        Command::Matrix { predecessors } => {
            commands::matrix::handle_matrix(&data, cli.format, predecessors)
        }
        Command::Paths { from } => commands::paths::handle_paths(&data, cli.format, from.as_deref()),
        Command::Demo { nodes, seed } => {
            commands::demo::handle_demo(&data, cli.format, nodes, seed)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
