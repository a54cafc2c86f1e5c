use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pathfinder_cli::commands::nodes::handle_nodes_command;
use pathfinder_cli::commands::reach::handle_reach_command;
use pathfinder_cli::commands::route::{handle_route_command, RouteCommandArgs};
use pathfinder_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest routes over a map of named locations")]
struct Cli {
    /// JSON map declaration file (nodes and two-way arcs).
    #[arg(long, env = "PATHFINDER_MAP", global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two nodes.
    Route {
        /// Starting node name.
        #[arg(long = "from")]
        from: String,
        /// Destination node name.
        #[arg(long = "to")]
        to: String,
    },
    /// List every node with its position and neighbours.
    Nodes,
    /// List the shortest distance from one node to every node it can reach.
    Reach {
        /// Origin node name.
        #[arg(long = "from")]
        from: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let map = cli
        .map
        .ok_or_else(|| anyhow::anyhow!("no map given; pass --map or set PATHFINDER_MAP"))?;

    match cli.command {
        Command::Route { from, to } => {
            handle_route_command(&map, cli.format, &RouteCommandArgs { from, to })
        }
        Command::Nodes => handle_nodes_command(&map, cli.format),
        Command::Reach { from } => handle_reach_command(&map, cli.format, &from),
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
