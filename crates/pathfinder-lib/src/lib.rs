//! Pathfinder library entry points.
//!
//! This crate holds a generic graph of named nodes joined by directed,
//! weighted edges, the min-priority queue used as a search frontier, and a
//! shortest-path search built on both. Map loaders and front ends (the CLI)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod map;
pub mod output;
pub mod path;
pub mod pqueue;
pub mod query;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Node, NodeId, Position};
pub use map::{build_graph, load_map, ArcDecl, MapData, NodeDecl};
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    find_shortest_path, find_shortest_path_with_stats, settled_distances, shortest_path, Path,
    PathStep, SearchStats,
};
pub use pqueue::PriorityQueue;
pub use query::{PathQuery, QueryState};
