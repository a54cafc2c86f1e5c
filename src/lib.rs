//! Workspace tooling package.
//!
//! Carries the pre-commit hook configuration only. The graph library lives in
//! `crates/pathfinder-lib` and the command-line front end in
//! `crates/pathfinder-cli`.
