//! Circuit JSON input: records, connectivity and node assignment.
//!
//! A [`CircuitGraph`] holds the decoded records in document order. Nets are
//! derived from its traces by a [`ConnectivityResolver`], and
//! [`build_node_map`] turns them into SPICE node names.

mod connectivity;
mod graph;
mod node_map;
mod types;

pub use connectivity::{ConnectivityMap, ConnectivityResolver};
pub use graph::CircuitGraph;
pub use node_map::{
    build_node_map, ground_nets, FloatingPortPolicy, GroundRule, NodeMap, GROUND_NODE,
};
pub use types::*;
