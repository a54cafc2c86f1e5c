//! Map declarations and graph construction.
//!
//! A map is a list of named locations with pixel positions plus a list of
//! roads joining pairs of locations. Roads are two-way: each declared arc
//! becomes a pair of directed edges in the built [`Graph`].

use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, Position};

/// A named location on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDecl {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A two-way road between two declared locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDecl {
    pub start: String,
    pub finish: String,
    pub distance: f64,
}

/// Already-parsed contents of a map file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Background image the locations are drawn over, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeDecl>,
    #[serde(default)]
    pub arcs: Vec<ArcDecl>,
}

impl MapData {
    /// Decode map declarations from JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::MalformedInput {
            message: format!("invalid map JSON: {err}"),
        })
    }
}

/// Read and decode a JSON map declaration file.
pub fn load_map(path: &FsPath) -> Result<MapData> {
    let text = fs::read_to_string(path)?;
    let map = MapData::from_json_str(&text)?;
    info!(
        path = %path.display(),
        nodes = map.nodes.len(),
        arcs = map.arcs.len(),
        "loaded map declarations"
    );
    Ok(map)
}

/// Build a graph from map declarations.
///
/// Every declared arc is inserted twice, once per direction, with the same
/// distance. Declaration problems are reported as [`Error::MalformedInput`]
/// naming the offending entry.
pub fn build_graph(map: &MapData) -> Result<Graph<Position>> {
    let mut graph = Graph::new();

    for decl in &map.nodes {
        graph
            .add_node_with(decl.name.clone(), Position::new(decl.x, decl.y))
            .map_err(|err| malformed(format!("node '{}'", decl.name), err))?;
    }

    for decl in &map.arcs {
        let context = || format!("arc {} - {}", decl.start, decl.finish);
        let start = graph
            .node_id(&decl.start)
            .map_err(|err| malformed(context(), err))?;
        let finish = graph
            .node_id(&decl.finish)
            .map_err(|err| malformed(context(), err))?;
        graph
            .add_edge(start, finish, decl.distance)
            .and_then(|_| graph.add_edge(finish, start, decl.distance))
            .map_err(|err| malformed(context(), err))?;
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built graph from map declarations"
    );
    Ok(graph)
}

fn malformed(context: String, err: Error) -> Error {
    Error::MalformedInput {
        message: format!("{context}: {err}"),
    }
}
