//! Route command handler for computing the shortest path between two nodes.

use std::path::Path;

use anyhow::{Context, Result};
use pathfinder_lib::{shortest_path, Error as PathError, RouteRenderMode, RouteSummary};

use crate::commands::load_graph;
use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node name.
    pub from: String,
    /// Destination node name.
    pub to: String,
}

/// Compute and render the route described by `args`.
pub fn run_route(map_path: &Path, format: OutputFormat, args: &RouteCommandArgs) -> Result<String> {
    let graph = load_graph(map_path)?;

    let path = shortest_path(&graph, &args.from, &args.to).map_err(|err| match err {
        PathError::NoPathFound { start, finish } => anyhow::anyhow!(
            "No path found between {start} and {finish}. \
             The nodes are not connected by any sequence of roads."
        ),
        other => anyhow::Error::new(other),
    })?;

    let summary = RouteSummary::from_path(&path, &graph);
    match format {
        OutputFormat::Json => {
            let mut text =
                serde_json::to_string_pretty(&summary).context("failed to serialise route")?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Text => Ok(summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Compact => Ok(summary.render(RouteRenderMode::Compact)),
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    map_path: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let rendered = run_route(map_path, format, args)?;
    print!("{rendered}");
    Ok(())
}
