//! Nodes command handler listing every node with its neighbours.

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::load_graph;
use crate::output::{render_nodes, NodeListing, OutputFormat};

/// Build the node listings for the map at `map_path`, ordered by name.
pub fn collect_nodes(map_path: &Path) -> Result<Vec<NodeListing>> {
    let graph = load_graph(map_path)?;
    let mut listings = Vec::with_capacity(graph.len());
    for (id, node) in graph.nodes() {
        let mut neighbors = Vec::new();
        for neighbor in graph.neighbors(id)? {
            neighbors.push(graph.name_of(neighbor)?.to_string());
        }
        listings.push(NodeListing {
            name: node.name().to_string(),
            x: node.payload().x,
            y: node.payload().y,
            neighbors,
        });
    }
    Ok(listings)
}

/// Handle the nodes subcommand.
pub fn handle_nodes_command(map_path: &Path, format: OutputFormat) -> Result<()> {
    let listings = collect_nodes(map_path)?;
    match format {
        OutputFormat::Json => {
            let text =
                serde_json::to_string_pretty(&listings).context("failed to serialise nodes")?;
            println!("{text}");
        }
        _ => print!("{}", render_nodes(&listings, format)),
    }
    Ok(())
}
