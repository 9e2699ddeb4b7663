//! Unweighted search: BFS over a FIFO queue, DFS over a LIFO stack.
//!
//! Both push neighbors freely and deduplicate at pop time, so no
//! "already queued" bookkeeping is needed.

use super::frontier::{Frontier, Queue, Stack};
use super::Traversal;
use crate::graph::GraphStore;
use crate::overlay::Overlay;
use crate::types::{Algorithm, NodeId, StepOutcome, TraversalStatus};
use tracing::debug;

/// Breadth-first search.
pub type Bfs = FrontierSearch<Queue>;

/// Depth-first search. Neighbors are pushed in reverse adjacency order so
/// pops follow the declared order.
pub type Dfs = FrontierSearch<Stack>;

/// Search driven by a frontier `F`; the frontier type alone fixes the order.
#[derive(Debug, Default)]
pub struct FrontierSearch<F: Frontier> {
    frontier: F,
    status: TraversalStatus,
}

impl<F: Frontier> FrontierSearch<F> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Algorithm tag for each frontier type.
pub trait SearchOrder {
    const ALGORITHM: Algorithm;
}

impl SearchOrder for Queue {
    const ALGORITHM: Algorithm = Algorithm::Bfs;
}

impl SearchOrder for Stack {
    const ALGORITHM: Algorithm = Algorithm::Dfs;
}

impl<F: Frontier + SearchOrder> Traversal for FrontierSearch<F> {
    fn algorithm(&self) -> Algorithm {
        F::ALGORITHM
    }

    fn start(&mut self, overlay: &mut Overlay, start: NodeId) {
        overlay.clear();
        self.frontier.clear();
        self.frontier.push(start);
        self.status = TraversalStatus::Running;
    }

    fn step(&mut self, graph: &GraphStore, overlay: &mut Overlay) -> StepOutcome {
        let Some(node) = self.frontier.pop() else {
            self.status = TraversalStatus::Exhausted;
            overlay.set_current(None);
            return StepOutcome::Done;
        };
        overlay.set_current(Some(node));

        if !overlay.mark_visited(node) {
            debug!("{}: node {} already visited", F::ALGORITHM, node);
            return StepOutcome::NoOp(node);
        }

        let discovered: Vec<NodeId> = graph
            .neighbors_of(node)
            .iter()
            .map(|&(neighbor, _)| neighbor)
            .filter(|&neighbor| !overlay.is_visited(neighbor))
            .collect();
        self.frontier.push_expansion(discovered.into_iter());

        debug!(
            "{}: visited {}, frontier {}",
            F::ALGORITHM,
            node,
            self.frontier.len()
        );
        StepOutcome::Advanced(node)
    }

    fn status(&self) -> TraversalStatus {
        self.status
    }

    fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
