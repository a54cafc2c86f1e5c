//! Reach command handler listing settled distances from one node.

use std::path::Path;

use anyhow::{Context, Result};
use pathfinder_lib::settled_distances;

use crate::commands::load_graph;
use crate::output::{render_reach, OutputFormat, ReachEntry};

/// Distances from `origin` to every reachable node, nearest first.
pub fn collect_reach(map_path: &Path, origin: &str) -> Result<Vec<ReachEntry>> {
    let graph = load_graph(map_path)?;
    let start = graph.node_id(origin)?;
    let mut entries: Vec<ReachEntry> = settled_distances(&graph, start)?
        .into_iter()
        .map(|(name, distance)| ReachEntry { name, distance })
        .collect();
    // Names arrive sorted; a stable sort keeps them as the tie-breaker.
    entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(entries)
}

/// Handle the reach subcommand.
pub fn handle_reach_command(map_path: &Path, format: OutputFormat, origin: &str) -> Result<()> {
    let entries = collect_reach(map_path, origin)?;
    match format {
        OutputFormat::Json => {
            let text =
                serde_json::to_string_pretty(&entries).context("failed to serialise distances")?;
            println!("{text}");
        }
        _ => print!("{}", render_reach(origin, &entries, format)),
    }
    Ok(())
}
