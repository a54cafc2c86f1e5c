//! Output formatting for command results.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly multi-line text.
    #[default]
    Text,
    /// One line per result.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// A node and the distinct nodes one edge away from it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeListing {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub neighbors: Vec<String>,
}

/// Settled distance from the origin of a `reach` query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReachEntry {
    pub name: String,
    pub distance: f64,
}

/// Render node listings in text form.
pub fn render_nodes(nodes: &[NodeListing], format: OutputFormat) -> String {
    let mut buffer = String::new();
    for node in nodes {
        match format {
            OutputFormat::Compact => {
                let _ = writeln!(buffer, "{}", node.name);
            }
            _ => {
                let neighbors = if node.neighbors.is_empty() {
                    "(isolated)".to_string()
                } else {
                    node.neighbors.join(", ")
                };
                let _ = writeln!(
                    buffer,
                    "{} ({}, {}) -> {}",
                    node.name, node.x, node.y, neighbors
                );
            }
        }
    }
    buffer
}

/// Render reachable distances in text form.
pub fn render_reach(origin: &str, entries: &[ReachEntry], format: OutputFormat) -> String {
    let mut buffer = String::new();
    if format == OutputFormat::Text {
        let _ = writeln!(
            buffer,
            "Reachable from {}: {} nodes",
            origin,
            entries.len()
        );
    }
    for entry in entries {
        let _ = writeln!(buffer, "{:>10.2}  {}", entry.distance, entry.name);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_nodes_are_marked() {
        let nodes = vec![NodeListing {
            name: "Lake".to_string(),
            x: 50.0,
            y: 400.0,
            neighbors: Vec::new(),
        }];
        assert_eq!(
            render_nodes(&nodes, OutputFormat::Text),
            "Lake (50, 400) -> (isolated)\n"
        );
        assert_eq!(render_nodes(&nodes, OutputFormat::Compact), "Lake\n");
    }

    #[test]
    fn reach_text_has_header() {
        let entries = vec![ReachEntry {
            name: "Quad".to_string(),
            distance: 0.0,
        }];
        let text = render_reach("Quad", &entries, OutputFormat::Text);
        assert!(text.starts_with("Reachable from Quad: 1 nodes\n"));
        assert!(text.ends_with("      0.00  Quad\n"));
    }
}
