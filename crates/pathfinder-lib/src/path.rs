use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::pqueue::PriorityQueue;

/// Separator placed between node names when a path is rendered.
pub const PATH_SEPARATOR: &str = "->";

/// One traversed edge, captured by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Shortest route between two nodes.
///
/// A path owns copies of the names and distances it traversed and holds no
/// handles into the graph it was computed from. The total distance is summed
/// once when the path is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    start: String,
    finish: String,
    steps: Vec<PathStep>,
    distance: f64,
}

impl Path {
    pub(crate) fn from_steps(start: impl Into<String>, steps: Vec<PathStep>) -> Self {
        let start = start.into();
        let finish = steps
            .last()
            .map(|step| step.to.clone())
            .unwrap_or_else(|| start.clone());
        let distance = steps.iter().fold(0.0, |total, step| total + step.distance);
        Self {
            start,
            finish,
            steps,
            distance,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn finish(&self) -> &str {
        &self.finish
    }

    /// Traversed edges from start to finish.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Total distance of the path.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Names of every node on the path, start and finish included.
    pub fn node_names(&self) -> Vec<&str> {
        std::iter::once(self.start.as_str())
            .chain(self.steps.iter().map(|step| step.to.as_str()))
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.start)?;
        for step in &self.steps {
            write!(f, "{PATH_SEPARATOR}{}", step.to)?;
        }
        Ok(())
    }
}

/// Counters describing the work a search performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes whose minimum distance was fixed.
    pub settled: usize,
    /// Settled nodes whose outgoing edges were explored.
    pub expanded: usize,
    /// Partial paths placed on the frontier, the seed included.
    pub enqueued: usize,
    /// Partial paths discarded because their terminal was already settled.
    pub stale: usize,
}

/// Link in the shared-prefix trail. Each frontier entry points at the last
/// link of its partial path.
#[derive(Debug, Clone, Copy)]
struct TrailLink {
    edge: EdgeId,
    parent: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct PartialPath {
    terminal: NodeId,
    distance: f64,
    tail: Option<usize>,
}

/// Priority-first search over a frontier of partial paths.
struct Search<'g, N, E> {
    graph: &'g Graph<N, E>,
    settled: HashMap<NodeId, f64>,
    trail: Vec<TrailLink>,
    frontier: PriorityQueue<PartialPath>,
    stats: SearchStats,
}

impl<'g, N, E> Search<'g, N, E> {
    fn new(graph: &'g Graph<N, E>, start: NodeId) -> Self {
        let mut frontier = PriorityQueue::new();
        frontier.enqueue(
            PartialPath {
                terminal: start,
                distance: 0.0,
                tail: None,
            },
            0.0,
        );
        Self {
            graph,
            settled: HashMap::new(),
            trail: Vec::new(),
            frontier,
            stats: SearchStats {
                enqueued: 1,
                ..SearchStats::default()
            },
        }
    }

    /// Pop partial paths until one reaches an unsettled node, then settle it.
    fn settle_next(&mut self) -> Result<Option<PartialPath>> {
        while !self.frontier.is_empty() {
            let partial = self.frontier.dequeue()?;
            if self.settled.contains_key(&partial.terminal) {
                self.stats.stale += 1;
                continue;
            }
            self.settled.insert(partial.terminal, partial.distance);
            self.stats.settled += 1;
            return Ok(Some(partial));
        }
        Ok(None)
    }

    /// Push one extension of `partial` per edge leading to an unsettled node.
    fn expand(&mut self, partial: PartialPath) -> Result<()> {
        self.stats.expanded += 1;
        let graph = self.graph;
        for (id, edge) in graph.edges_from(partial.terminal)? {
            if self.settled.contains_key(&edge.finish()) {
                continue;
            }
            self.trail.push(TrailLink {
                edge: id,
                parent: partial.tail,
            });
            let distance = partial.distance + edge.distance();
            self.frontier.enqueue(
                PartialPath {
                    terminal: edge.finish(),
                    distance,
                    tail: Some(self.trail.len() - 1),
                },
                distance,
            );
            self.stats.enqueued += 1;
        }
        Ok(())
    }

    fn materialize(&self, start: NodeId, partial: PartialPath) -> Result<Path> {
        let mut edges = Vec::new();
        let mut cursor = partial.tail;
        while let Some(index) = cursor {
            let link = self.trail[index];
            edges.push(link.edge);
            cursor = link.parent;
        }
        edges.reverse();

        let mut steps = Vec::with_capacity(edges.len());
        for id in edges {
            let edge = self.graph.edge(id)?;
            steps.push(PathStep {
                from: self.graph.name_of(edge.start())?.to_string(),
                to: self.graph.name_of(edge.finish())?.to_string(),
                distance: edge.distance(),
            });
        }
        Ok(Path::from_steps(self.graph.name_of(start)?, steps))
    }
}

/// Find the shortest path from `start` to `finish`.
///
/// Returns `Ok(None)` when the finish cannot be reached. Handles that do not
/// belong to `graph` are reported as errors.
pub fn find_shortest_path<N, E>(
    graph: &Graph<N, E>,
    start: NodeId,
    finish: NodeId,
) -> Result<Option<Path>> {
    find_shortest_path_with_stats(graph, start, finish).map(|(path, _)| path)
}

/// Same as [`find_shortest_path`], also reporting search counters.
pub fn find_shortest_path_with_stats<N, E>(
    graph: &Graph<N, E>,
    start: NodeId,
    finish: NodeId,
) -> Result<(Option<Path>, SearchStats)> {
    graph.node(start)?;
    graph.node(finish)?;

    let mut search = Search::new(graph, start);
    while let Some(partial) = search.settle_next()? {
        if partial.terminal == finish {
            let path = search.materialize(start, partial)?;
            debug!(
                path = %path,
                distance = path.distance(),
                settled = search.stats.settled,
                enqueued = search.stats.enqueued,
                "shortest path found"
            );
            return Ok((Some(path), search.stats));
        }
        search.expand(partial)?;
    }

    let (start_name, finish_name) = (graph.name_of(start)?, graph.name_of(finish)?);
    debug!(
        start = start_name,
        finish = finish_name,
        settled = search.stats.settled,
        "frontier exhausted without reaching finish"
    );
    Ok((None, search.stats))
}

/// Find the shortest path between two nodes identified by name.
///
/// Unknown names fail with [`Error::NodeNotFound`]; disconnected endpoints
/// fail with [`Error::NoPathFound`].
pub fn shortest_path<N, E>(graph: &Graph<N, E>, start: &str, finish: &str) -> Result<Path> {
    let start_id = graph.node_id(start)?;
    let finish_id = graph.node_id(finish)?;
    find_shortest_path(graph, start_id, finish_id)?.ok_or_else(|| Error::NoPathFound {
        start: start.to_string(),
        finish: finish.to_string(),
    })
}

/// Minimum distance from `start` to every node it can reach, keyed by name.
pub fn settled_distances<N, E>(
    graph: &Graph<N, E>,
    start: NodeId,
) -> Result<BTreeMap<String, f64>> {
    graph.node(start)?;

    let mut search = Search::new(graph, start);
    while let Some(partial) = search.settle_next()? {
        search.expand(partial)?;
    }

    let mut distances = BTreeMap::new();
    for (id, distance) in &search.settled {
        distances.insert(graph.name_of(*id)?.to_string(), *distance);
    }
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        let mut graph = Graph::new();
        for name in ["A", "B", "C", "D"] {
            graph.add_node(name).unwrap();
        }
        graph.add_edge_by_name("A", "B", 1.0).unwrap();
        graph.add_edge_by_name("A", "C", 1.0).unwrap();
        graph.add_edge_by_name("B", "D", 1.0).unwrap();
        graph.add_edge_by_name("C", "D", 1.0).unwrap();
        graph
    }

    #[test]
    fn equal_cost_ties_follow_edge_insertion_order() {
        let graph = diamond();
        let path = shortest_path(&graph, "A", "D").unwrap();
        assert_eq!(path.to_string(), "A->B->D");
        assert_eq!(path.distance(), 2.0);
    }

    #[test]
    fn stale_frontier_entries_are_counted() {
        let graph = diamond();
        let a = graph.node_id("A").unwrap();
        let d = graph.node_id("D").unwrap();
        let (path, stats) = find_shortest_path_with_stats(&graph, a, d).unwrap();

        assert!(path.is_some());
        // A, B, C settle before D; C's edge to D duplicates B's.
        assert_eq!(stats.settled, 4);
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.enqueued, 5);
        assert_eq!(stats.stale, 0);
    }

    #[test]
    fn single_source_distances_cover_reachable_nodes() {
        let mut graph = diamond();
        graph.add_node("Island").unwrap();
        let a = graph.node_id("A").unwrap();

        let distances = settled_distances(&graph, a).unwrap();
        assert_eq!(distances.len(), 4);
        assert_eq!(distances["A"], 0.0);
        assert_eq!(distances["D"], 2.0);
        assert!(!distances.contains_key("Island"));
    }

    #[test]
    fn node_names_include_both_endpoints() {
        let graph = diamond();
        let path = shortest_path(&graph, "A", "D").unwrap();
        assert_eq!(path.node_names(), vec!["A", "B", "D"]);
        assert_eq!(path.start(), "A");
        assert_eq!(path.finish(), "D");
    }
}
