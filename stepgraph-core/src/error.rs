//! Error types for stepgraph-core.

use crate::types::{NodeId, MAX_NODES};
use thiserror::Error;

/// Result type alias for graph construction and run start.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Configuration errors. All of them are raised before a run starts; once a
/// run is in progress every command is total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node count outside `1..=MAX_NODES`.
    #[error("Invalid number of nodes: {count} (expected 1 to {max})", max = MAX_NODES)]
    InvalidNodeCount {
        /// Declared node count.
        count: usize,
    },

    /// Start or end node outside `1..=num_nodes`.
    #[error("Invalid {role} node: {node} (expected 1 to {num_nodes})")]
    InvalidEndpoint {
        /// Which endpoint was rejected ("start" or "end").
        role: &'static str,
        /// The rejected node id.
        node: NodeId,
        /// Node count of the graph.
        num_nodes: usize,
    },

    /// Edge endpoint outside `1..=num_nodes` under strict edge validation.
    #[error("Invalid edge ({u}, {v}): endpoints must be between 1 and {num_nodes}")]
    InvalidEdge {
        u: NodeId,
        v: NodeId,
        num_nodes: usize,
    },
}
