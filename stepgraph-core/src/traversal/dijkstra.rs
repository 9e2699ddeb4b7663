//! Steppable Dijkstra shortest-path search.
//!
//! Relaxation uses a strict `<`, so an equal-cost alternative never replaces
//! an existing parent and the reconstructed path is fixed by adjacency order.
//! Edge weights are unsigned; negative weights cannot be expressed.

use super::frontier::MinQueue;
use super::Traversal;
use crate::graph::GraphStore;
use crate::overlay::Overlay;
use crate::path;
use crate::types::{Algorithm, Distance, NodeId, StepOutcome, TraversalStatus};
use tracing::debug;

#[derive(Debug, Default)]
pub struct Dijkstra {
    queue: MinQueue,
    target: Option<NodeId>,
    status: TraversalStatus,
}

impl Dijkstra {
    /// `target` is the end node whose path is reconstructed on exhaustion.
    pub fn new(target: Option<NodeId>) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    fn finish(&mut self, overlay: &mut Overlay) {
        self.status = TraversalStatus::Exhausted;
        overlay.set_current(None);

        if let Some(end) = self.target {
            let shortest = path::reconstruct(overlay, end);
            debug!(
                "Dijkstra: exhausted, distance to {} is {}, path {:?}",
                end,
                overlay.distance_of(end),
                shortest
            );
            overlay.set_shortest_path(shortest);
        }
    }
}

impl Traversal for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn start(&mut self, overlay: &mut Overlay, start: NodeId) {
        overlay.clear();
        self.queue.clear();
        overlay.set_distance(start, Distance::Finite(0));
        self.queue.push(0, start);
        self.status = TraversalStatus::Running;
    }

    fn step(&mut self, graph: &GraphStore, overlay: &mut Overlay) -> StepOutcome {
        let Some((_, u)) = self.queue.pop() else {
            // Reconstruct only on the transition, not on repeated calls.
            if self.status == TraversalStatus::Running {
                self.finish(overlay);
            } else {
                self.status = TraversalStatus::Exhausted;
                overlay.set_current(None);
            }
            return StepOutcome::Done;
        };
        overlay.set_current(Some(u));

        if !overlay.mark_visited(u) {
            debug!("Dijkstra: stale entry for {}", u);
            return StepOutcome::NoOp(u);
        }

        let base = overlay.distance_of(u);
        for &(v, w) in graph.neighbors_of(u) {
            if overlay.is_visited(v) {
                continue;
            }
            let candidate = base.extend(w);
            if candidate < overlay.distance_of(v) {
                overlay.set_distance(v, candidate);
                overlay.set_parent(v, u);
                if let Some(d) = candidate.as_finite() {
                    self.queue.push(d, v);
                }
            }
        }

        debug!(
            "Dijkstra: settled {} at {}, queue {}",
            u,
            base,
            self.queue.len()
        );
        StepOutcome::Advanced(u)
    }

    fn status(&self) -> TraversalStatus {
        self.status
    }

    fn frontier_len(&self) -> usize {
        self.queue.len()
    }
}
