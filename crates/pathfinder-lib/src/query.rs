//! Stateful path query with lazy, cached solving.
//!
//! A [`PathQuery`] moves through three states:
//!
//! - `Unconfigured`: graph, start or finish still missing.
//! - `Configured`: everything set, search not yet run.
//! - `Solved`: the search ran once and its outcome is fixed.
//!
//! The first call to [`PathQuery::distance`], [`PathQuery::render`] or
//! [`PathQuery::path`] runs the search. Later calls return the cached outcome
//! without searching again, and the endpoints can no longer change.

use std::cell::Cell;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, Position};
use crate::path::{find_shortest_path_with_stats, Path, SearchStats};

/// Lifecycle of a [`PathQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Unconfigured,
    Configured,
    Solved,
}

#[derive(Debug)]
struct Solution {
    path: Option<Path>,
    stats: SearchStats,
}

/// Shortest-path request between two named nodes of a borrowed graph.
#[derive(Debug)]
pub struct PathQuery<'g, N = Position, E = ()> {
    graph: Option<&'g Graph<N, E>>,
    start: Option<String>,
    finish: Option<String>,
    solution: OnceCell<Solution>,
    searches: Cell<usize>,
}

impl<'g, N, E> Default for PathQuery<'g, N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g, N, E> PathQuery<'g, N, E> {
    pub fn new() -> Self {
        Self {
            graph: None,
            start: None,
            finish: None,
            solution: OnceCell::new(),
            searches: Cell::new(0),
        }
    }

    /// Convenience constructor for a fully configured query.
    pub fn between(
        graph: &'g Graph<N, E>,
        start: impl Into<String>,
        finish: impl Into<String>,
    ) -> Self {
        Self {
            graph: Some(graph),
            start: Some(start.into()),
            finish: Some(finish.into()),
            solution: OnceCell::new(),
            searches: Cell::new(0),
        }
    }

    pub fn state(&self) -> QueryState {
        if self.solution.get().is_some() {
            QueryState::Solved
        } else if self.graph.is_some() && self.start.is_some() && self.finish.is_some() {
            QueryState::Configured
        } else {
            QueryState::Unconfigured
        }
    }

    pub fn set_graph(&mut self, graph: &'g Graph<N, E>) -> Result<&mut Self> {
        self.ensure_unsolved()?;
        self.graph = Some(graph);
        Ok(self)
    }

    pub fn set_start(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.ensure_unsolved()?;
        self.start = Some(name.into());
        Ok(self)
    }

    pub fn set_finish(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.ensure_unsolved()?;
        self.finish = Some(name.into());
        Ok(self)
    }

    /// Run the search if it has not run yet.
    ///
    /// Returns whether the finish is reachable. An unreachable finish is a
    /// valid, cached outcome; configuration problems and unknown node names
    /// are errors and leave the query unsolved.
    pub fn solve(&self) -> Result<bool> {
        self.solution().map(|solution| solution.path.is_some())
    }

    /// The shortest path, or [`Error::NoPathFound`] if none exists.
    pub fn path(&self) -> Result<&Path> {
        let solution = self.solution()?;
        solution.path.as_ref().ok_or_else(|| Error::NoPathFound {
            start: self.start.clone().unwrap_or_default(),
            finish: self.finish.clone().unwrap_or_default(),
        })
    }

    /// Total distance of the shortest path.
    pub fn distance(&self) -> Result<f64> {
        self.path().map(Path::distance)
    }

    /// Shortest path rendered as `A->B->C`.
    pub fn render(&self) -> Result<String> {
        self.path().map(ToString::to_string)
    }

    /// Counters of the search, once it has run.
    pub fn stats(&self) -> Option<SearchStats> {
        self.solution.get().map(|solution| solution.stats)
    }

    /// Number of times the search has executed for this query (0 or 1).
    pub fn searches(&self) -> usize {
        self.searches.get()
    }

    fn ensure_unsolved(&self) -> Result<()> {
        if self.solution.get().is_some() {
            return Err(Error::QuerySolved);
        }
        Ok(())
    }

    fn solution(&self) -> Result<&Solution> {
        self.solution.get_or_try_init(|| {
            let graph = self
                .graph
                .ok_or(Error::QueryNotConfigured { missing: "graph" })?;
            let start = self
                .start
                .as_deref()
                .ok_or(Error::QueryNotConfigured { missing: "start" })?;
            let finish = self
                .finish
                .as_deref()
                .ok_or(Error::QueryNotConfigured { missing: "finish" })?;

            let start_id = graph.node_id(start)?;
            let finish_id = graph.node_id(finish)?;
            self.searches.set(self.searches.get() + 1);
            let (path, stats) = find_shortest_path_with_stats(graph, start_id, finish_id)?;
            debug!(start, finish, reachable = path.is_some(), "path query solved");
            Ok(Solution { path, stats })
        })
    }
}
