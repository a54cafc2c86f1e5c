//! Pathfinder CLI library.
//!
//! Command handlers and output formatting for the `pathfinder` binary. The
//! binary only parses arguments and dispatches to the handlers exported here.

pub mod commands;
pub mod output;
