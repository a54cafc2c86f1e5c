use std::fmt::Write;

use serde::Serialize;

use crate::graph::{Graph, Position};
use crate::path::Path;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header line followed by one line per stop.
    PlainText,
    /// Single `A->B->C` line with the total distance.
    Compact,
}

/// Stop along a rendered route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub name: String,
    /// Distance of the leg arriving at this stop; zero for the start.
    pub leg: f64,
    pub cumulative: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Structured representation of a path that renderers can serialise or draw.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub finish: String,
    pub distance: f64,
    pub hops: usize,
    pub route: String,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Path`] into a summary, attaching node positions from `graph`
    /// where the node still exists.
    pub fn from_path<E>(path: &Path, graph: &Graph<Position, E>) -> Self {
        let position_of = |name: &str| {
            graph
                .node_by_name(name)
                .ok()
                .map(|node| *node.payload())
        };

        let mut steps = Vec::with_capacity(path.hop_count() + 1);
        steps.push(RouteStep {
            index: 0,
            name: path.start().to_string(),
            leg: 0.0,
            cumulative: 0.0,
            position: position_of(path.start()),
        });

        let mut cumulative = 0.0;
        for (offset, step) in path.steps().iter().enumerate() {
            cumulative += step.distance;
            steps.push(RouteStep {
                index: offset + 1,
                name: step.to.clone(),
                leg: step.distance,
                cumulative,
                position: position_of(&step.to),
            });
        }

        Self {
            start: path.start().to_string(),
            finish: path.finish().to_string(),
            distance: path.distance(),
            hops: path.hop_count(),
            route: path.to_string(),
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => format!("{} ({:.2})\n", self.route, self.distance),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, distance: {:.2})",
            self.start, self.finish, self.hops, self.distance
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} (+{:.2}, total {:.2})",
                step.index, step.name, step.leg, step.cumulative
            );
        }
        buffer
    }
}
