// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. The main.rs dispatches to
// these handlers, keeping the entry point focused on parsing and coordination.

pub mod nodes;
pub mod reach;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use pathfinder_lib::{build_graph, load_map, Graph};

/// Load map declarations from `path` and build the routing graph.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let map =
        load_map(path).with_context(|| format!("failed to load map from {}", path.display()))?;
    let graph = build_graph(&map)
        .with_context(|| format!("failed to build graph from {}", path.display()))?;
    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "graph ready"
    );
    Ok(graph)
}
