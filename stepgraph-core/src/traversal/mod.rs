//! Traversal state machines.
//!
//! Each algorithm is a small state machine (`Idle -> Running -> Exhausted`)
//! that owns its frontier and mutates a shared [`Overlay`]. One call to
//! [`Traversal::step`] performs exactly one frontier pop:
//!
//! 1. Empty frontier: become `Exhausted`, clear `current_node`, return `Done`.
//! 2. Pop a node and make it `current_node`.
//! 3. Already visited: return `NoOp` (stale entry; nothing else changes).
//! 4. Otherwise mark it visited, expand it, return `Advanced`.
//!
//! Steps never block and never sleep; cadence belongs to the caller.

pub mod dijkstra;
pub mod frontier;
pub mod search;

pub use dijkstra::Dijkstra;
pub use frontier::{Frontier, MinQueue, Queue, Stack};
pub use search::{Bfs, Dfs, FrontierSearch};

use crate::graph::GraphStore;
use crate::overlay::Overlay;
use crate::types::{Algorithm, NodeId, StepOutcome, TraversalStatus};

/// Uniform start/step/status contract shared by every algorithm.
pub trait Traversal: std::fmt::Debug + Send {
    /// Which algorithm this state machine runs.
    fn algorithm(&self) -> Algorithm;

    /// Clear the overlay, seed the frontier with `start`, become `Running`.
    fn start(&mut self, overlay: &mut Overlay, start: NodeId);

    /// Perform one atomic step.
    fn step(&mut self, graph: &GraphStore, overlay: &mut Overlay) -> StepOutcome;

    fn status(&self) -> TraversalStatus;

    /// Number of frontier entries, stale duplicates included.
    fn frontier_len(&self) -> usize;
}

/// Create the state machine for `algorithm`.
///
/// `target` is only used by Dijkstra, for path reconstruction.
pub fn create(algorithm: Algorithm, target: Option<NodeId>) -> Box<dyn Traversal> {
    match algorithm {
        Algorithm::Bfs => Box::new(Bfs::new()),
        Algorithm::Dfs => Box::new(Dfs::new()),
        Algorithm::Dijkstra => Box::new(Dijkstra::new(target)),
    }
}
