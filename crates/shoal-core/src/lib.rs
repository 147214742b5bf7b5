#![forbid(unsafe_code)]

//! Follows-graph parsing, serialization and orchestration (headless).
//!
//! Design goals:
//! - deterministic outputs for a given input (stable node/component order)
//! - application policy (handle sigil, self-follow rejection, auto-creation
//!   from relations) layered strictly on top of the `shoal-graphlib`
//!   container, never inside it
//! - round-trip fidelity between [`parse`] and [`write`]

pub mod error;
pub mod handle;
pub mod parse;
pub mod service;
pub mod tracker;
pub mod write;

pub use error::{Error, Result};
pub use parse::{ParseOutcome, parse_graph, parse_graph_file, parse_graph_with_origin};
pub use service::{GraphService, LoadReport, Relation, SccComputation};
pub use tracker::UnsavedChangesTracker;
pub use write::{write_graph, write_graph_file};

// Container types callers routinely touch alongside this crate.
pub use shoal_graphlib::{AdjacencyView, Graph, GraphError};

#[cfg(test)]
mod tests;
