use thiserror::Error;

/// Convenient result alias for the pathfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node is added under a name that is already taken.
    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    /// Raised when a node name could not be found in the graph.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    NodeNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a node handle refers to a node that has been removed.
    #[error("node handle does not refer to a node in this graph")]
    StaleNode,

    /// Raised when an edge handle refers to an edge that has been removed.
    #[error("edge handle does not refer to an edge in this graph")]
    EdgeNotFound,

    /// Raised when an edge weight is negative or not a finite number.
    #[error("edge distance must be finite and non-negative, got {distance}")]
    InvalidDistance { distance: f64 },

    /// Raised when reading from an empty priority queue.
    #[error("{operation}: attempting to {operation} an empty queue")]
    EmptyQueue { operation: &'static str },

    /// Raised when the search exhausts its frontier without reaching the finish.
    #[error("no path found between {start} and {finish}")]
    NoPathFound { start: String, finish: String },

    /// Raised when a path query is used before its graph and endpoints are set.
    #[error("path query is missing its {missing}")]
    QueryNotConfigured { missing: &'static str },

    /// Raised when reconfiguring a path query whose result is already fixed.
    #[error("path query has already been solved and can no longer change")]
    QuerySolved,

    /// Raised when map declarations cannot be turned into a graph.
    #[error("malformed map input: {message}")]
    MalformedInput { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error signals a caller bug rather than a normal outcome.
    ///
    /// Lookups of absent nodes and reads from an empty queue break the
    /// preconditions of the operation; callers are expected to check with
    /// [`Graph::node_exists`](crate::Graph::node_exists) or
    /// [`PriorityQueue::is_empty`](crate::PriorityQueue::is_empty) first and
    /// abort when they did not.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Error::NodeNotFound { .. }
                | Error::StaleNode
                | Error::EdgeNotFound
                | Error::EmptyQueue { .. }
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
