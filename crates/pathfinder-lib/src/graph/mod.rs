//! Named-node graph with directed, weighted edges.
//!
//! Nodes and edges live in arenas owned by the [`Graph`] and are addressed by
//! generational handles ([`NodeId`], [`EdgeId`]). A node records the handles
//! of the edges leaving it and an edge records the handles of its endpoints,
//! so neither side holds a reference into the other.
//!
//! Edges are directed. Undirected roads are modelled as a pair of edges, one
//! per direction (see [`crate::map::build_graph`]).

mod arena;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};

use self::arena::{Arena, Key};

/// Maximum number of "did you mean" suggestions attached to a lookup error.
const MAX_NAME_SUGGESTIONS: usize = 3;

/// Minimum Jaro-Winkler similarity for a name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Handle to a node stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Key);

/// Handle to an edge stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(Key);

impl NodeId {
    /// Slot index backing this handle. Slots are recycled after removal.
    pub fn index(self) -> u32 {
        self.0.index()
    }
}

impl EdgeId {
    /// Slot index backing this handle. Slots are recycled after removal.
    pub fn index(self) -> u32 {
        self.0.index()
    }
}

/// Location of a node on the rendered map, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A named vertex carrying a caller-defined payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<N = Position> {
    name: String,
    payload: N,
    edges: Vec<EdgeId>,
}

impl<N> Node<N> {
    /// Build a detached node. It has no edges until it is inserted into a graph.
    pub fn new(name: impl Into<String>, payload: N) -> Self {
        Self {
            name: name.into(),
            payload,
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut N {
        &mut self.payload
    }

    /// Handles of the edges leaving this node, in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// A directed, weighted connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<E = ()> {
    start: NodeId,
    finish: NodeId,
    distance: f64,
    payload: E,
}

impl<E> Edge<E> {
    pub fn with_payload(start: NodeId, finish: NodeId, distance: f64, payload: E) -> Self {
        Self {
            start,
            finish,
            distance,
            payload,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn finish(&self) -> NodeId {
        self.finish
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}

impl<E: Default> Edge<E> {
    pub fn new(start: NodeId, finish: NodeId, distance: f64) -> Self {
        Self::with_payload(start, finish, distance, E::default())
    }
}

/// Graph of uniquely named nodes joined by directed edges.
///
/// Every edge appears both in the global edge set and in the outgoing list
/// of its start node. Removing a node removes every edge touching it, in
/// either direction.
///
/// Cloning produces an independent deep copy. Handles issued by the original
/// resolve to the corresponding nodes and edges of the copy.
#[derive(Debug, Clone)]
pub struct Graph<N = Position, E = ()> {
    nodes: Arena<Node<N>>,
    edges: Arena<Edge<E>>,
    index: BTreeMap<String, NodeId>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            edges: Arena::new(),
            index: BTreeMap::new(),
        }
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Remove every node and edge. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
    }

    /// Create a node with the given name and payload.
    pub fn add_node_with(&mut self, name: impl Into<String>, payload: N) -> Result<NodeId> {
        self.insert_node(Node::new(name, payload))
    }

    /// Take ownership of a caller-built node.
    pub fn insert_node(&mut self, mut node: Node<N>) -> Result<NodeId> {
        if self.index.contains_key(&node.name) {
            return Err(Error::DuplicateNode { name: node.name });
        }
        node.edges.clear();
        let name = node.name.clone();
        let id = NodeId(self.nodes.insert(node));
        trace!(node = %name, "added node");
        self.index.insert(name, id);
        Ok(id)
    }

    /// Remove a node together with every edge that starts or ends at it.
    ///
    /// The detached node is handed back to the caller with an empty edge list.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node<N>> {
        if !self.nodes.contains(id.0) {
            return Err(Error::StaleNode);
        }

        let incident: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, edge)| edge.start == id || edge.finish == id)
            .map(|(key, _)| EdgeId(key))
            .collect();
        for edge in &incident {
            self.detach_edge(*edge);
        }

        let mut node = self.nodes.remove(id.0).ok_or(Error::StaleNode)?;
        node.edges.clear();
        self.index.remove(&node.name);
        debug!(
            node = %node.name,
            removed_edges = incident.len(),
            "removed node and incident edges"
        );
        Ok(node)
    }

    pub fn remove_node_by_name(&mut self, name: &str) -> Result<Node<N>> {
        let id = self.node_id(name)?;
        self.remove_node(id)
    }

    /// Look up a node handle by name.
    ///
    /// An unknown name is a caller error; use [`Graph::node_exists`] to probe.
    pub fn node_id(&self, name: &str) -> Result<NodeId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::NodeNotFound {
                name: name.to_string(),
                suggestions: self.similar_names(name, MAX_NAME_SUGGESTIONS),
            })
    }

    pub fn node_exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<N>> {
        self.nodes.get(id.0).ok_or(Error::StaleNode)
    }

    /// Mutable access to a node. Its name and edge list stay owned by the graph.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<N>> {
        self.nodes.get_mut(id.0).ok_or(Error::StaleNode)
    }

    pub fn node_by_name(&self, name: &str) -> Result<&Node<N>> {
        let id = self.node_id(name)?;
        self.node(id)
    }

    /// Name of the node behind `id`.
    pub fn name_of(&self, id: NodeId) -> Result<&str> {
        self.node(id).map(Node::name)
    }

    /// Register a caller-built edge.
    ///
    /// Both endpoints must belong to this graph and the distance must be a
    /// finite, non-negative number.
    pub fn insert_edge(&mut self, edge: Edge<E>) -> Result<EdgeId> {
        if !self.nodes.contains(edge.start.0) || !self.nodes.contains(edge.finish.0) {
            return Err(Error::StaleNode);
        }
        if !edge.distance.is_finite() || edge.distance < 0.0 {
            return Err(Error::InvalidDistance {
                distance: edge.distance,
            });
        }
        let (start, finish, distance) = (edge.start, edge.finish, edge.distance);

        let id = EdgeId(self.edges.insert(edge));
        if let Some(node) = self.nodes.get_mut(start.0) {
            node.edges.push(id);
        }
        trace!(
            start = start.index(),
            finish = finish.index(),
            distance,
            "added edge"
        );
        Ok(id)
    }

    pub fn add_edge_with(
        &mut self,
        start: NodeId,
        finish: NodeId,
        distance: f64,
        payload: E,
    ) -> Result<EdgeId> {
        self.insert_edge(Edge::with_payload(start, finish, distance, payload))
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge<E>> {
        self.edges.get(id.0).ok_or(Error::EdgeNotFound)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(id.0)
    }

    /// Remove a single edge from the global set and its start node.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge<E>> {
        self.detach_edge(id).ok_or(Error::EdgeNotFound)
    }

    /// Remove every edge running from `start` to `finish`.
    ///
    /// Returns how many parallel edges were removed; zero is not an error.
    pub fn remove_edges_between(&mut self, start: NodeId, finish: NodeId) -> Result<usize> {
        if !self.contains_node(finish) {
            return Err(Error::StaleNode);
        }
        let matching: Vec<EdgeId> = self
            .edges_from(start)?
            .filter(|(_, edge)| edge.finish == finish)
            .map(|(id, _)| id)
            .collect();
        for id in &matching {
            self.detach_edge(*id);
        }
        Ok(matching.len())
    }

    pub fn remove_edges_between_names(&mut self, start: &str, finish: &str) -> Result<usize> {
        let start = self.node_id(start)?;
        let finish = self.node_id(finish)?;
        self.remove_edges_between(start, finish)
    }

    /// Returns `true` if at least one edge runs from `start` to `finish`.
    pub fn is_connected(&self, start: NodeId, finish: NodeId) -> bool {
        self.edges_from(start)
            .map(|mut edges| edges.any(|(_, edge)| edge.finish == finish))
            .unwrap_or(false)
    }

    pub fn is_connected_by_name(&self, start: &str, finish: &str) -> bool {
        match (self.index.get(start), self.index.get(finish)) {
            (Some(&start), Some(&finish)) => self.is_connected(start, finish),
            _ => false,
        }
    }

    /// Iterate over all nodes ordered by name.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<N>)> + '_ {
        self.index
            .values()
            .filter_map(move |&id| self.nodes.get(id.0).map(|node| (id, node)))
    }

    /// Iterate over every edge in the graph.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<E>)> + '_ {
        self.edges.iter().map(|(key, edge)| (EdgeId(key), edge))
    }

    /// Iterate over the edges leaving `id`, in insertion order.
    pub fn edges_from(&self, id: NodeId) -> Result<impl Iterator<Item = (EdgeId, &Edge<E>)> + '_> {
        let node = self.node(id)?;
        Ok(node
            .edges
            .iter()
            .filter_map(move |&edge| self.edges.get(edge.0).map(|value| (edge, value))))
    }

    pub fn edges_from_name(
        &self,
        name: &str,
    ) -> Result<impl Iterator<Item = (EdgeId, &Edge<E>)> + '_> {
        let id = self.node_id(name)?;
        self.edges_from(id)
    }

    /// Distinct finish nodes of the edges leaving `id`, in first-seen order.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut neighbors: Vec<NodeId> = Vec::new();
        for (_, edge) in self.edges_from(id)? {
            if !neighbors.contains(&edge.finish) {
                neighbors.push(edge.finish);
            }
        }
        Ok(neighbors)
    }

    pub fn neighbors_by_name(&self, name: &str) -> Result<Vec<NodeId>> {
        let id = self.node_id(name)?;
        self.neighbors(id)
    }

    /// Node names similar to `name`, best match first.
    pub fn similar_names(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .index
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    fn detach_edge(&mut self, id: EdgeId) -> Option<Edge<E>> {
        let edge = self.edges.remove(id.0)?;
        if let Some(node) = self.nodes.get_mut(edge.start.0) {
            node.edges.retain(|existing| *existing != id);
        }
        Some(edge)
    }
}

impl<N: Default, E> Graph<N, E> {
    /// Create a node with a default payload.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId> {
        self.add_node_with(name, N::default())
    }
}

impl<N, E: Default> Graph<N, E> {
    /// Create a directed edge from `start` to `finish`.
    pub fn add_edge(&mut self, start: NodeId, finish: NodeId, distance: f64) -> Result<EdgeId> {
        self.insert_edge(Edge::new(start, finish, distance))
    }

    /// Create a directed edge between two nodes identified by name.
    pub fn add_edge_by_name(&mut self, start: &str, finish: &str, distance: f64) -> Result<EdgeId> {
        let start = self.node_id(start)?;
        let finish = self.node_id(finish)?;
        self.add_edge(start, finish, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let c = graph.add_node("C").unwrap();
        graph.add_edge(a, b, 1.0).unwrap();
        graph.add_edge(b, c, 1.0).unwrap();
        graph.add_edge(c, a, 1.0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn inserted_node_starts_without_edges() {
        let mut graph: Graph = Graph::new();
        let id = graph
            .insert_node(Node::new("Quad", Position::new(10.0, 20.0)))
            .unwrap();
        let node = graph.node(id).unwrap();
        assert_eq!(node.name(), "Quad");
        assert_eq!(node.payload(), &Position::new(10.0, 20.0));
        assert!(node.edges().is_empty());
    }

    #[test]
    fn stale_handles_are_rejected_after_removal() {
        let (mut graph, a, b, _) = triangle();
        graph.remove_node(b).unwrap();
        let reused = graph.add_node("D").unwrap();

        assert!(matches!(graph.node(b), Err(Error::StaleNode)));
        assert!(matches!(graph.add_edge(a, b, 1.0), Err(Error::StaleNode)));
        assert_eq!(graph.name_of(reused).unwrap(), "D");
    }

    #[test]
    fn removing_node_scrubs_outgoing_lists() {
        let (mut graph, a, b, c) = triangle();
        graph.remove_node(c).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node(b).unwrap().edges().len(), 0);
        assert_eq!(graph.neighbors(a).unwrap(), vec![b]);
    }

    #[test]
    fn rejects_invalid_distances() {
        let (mut graph, a, b, _) = triangle();
        for distance in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                graph.add_edge(a, b, distance),
                Err(Error::InvalidDistance { .. })
            ));
        }
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn suggestions_rank_closest_names() {
        let mut graph: Graph = Graph::new();
        for name in ["Tresidder", "Terman", "Gates"] {
            graph.add_node(name).unwrap();
        }
        assert_eq!(graph.similar_names("Tresider", 3), vec!["Tresidder"]);
        assert!(graph.similar_names("Xyz", 3).is_empty());
    }
}
