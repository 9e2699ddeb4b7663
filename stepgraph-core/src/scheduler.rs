//! Step Scheduler: decides when the active traversal takes a step.
//!
//! Three ways to drive a run:
//!
//! - **Auto**: an external cadence source calls [`StepScheduler::tick`]; a tick
//!   steps only while running, not paused and not in step mode.
//! - **Step**: the host calls [`StepScheduler::manual_step`] on user action.
//!   Manual steps work whenever a run is in progress, paused or not.
//! - **Paused**: ticks do nothing until [`StepScheduler::resume`].
//!
//! Every command is total. Calling one in a state where it has no meaning is a
//! no-op, never an error; only [`StepScheduler::start_run`] validates input.

use crate::error::Result;
use crate::graph::GraphStore;
use crate::overlay::Overlay;
use crate::traversal::{self, Traversal};
use crate::types::{Algorithm, Distance, NodeId, RunMode, StepOutcome, TraversalStatus};
use serde::Serialize;
use tracing::{debug, info};

/// Step counters for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepStats {
    /// Every `step()` call, including the final one that reported done.
    pub steps: usize,
    /// Steps that visited a new node.
    pub advanced: usize,
    /// Steps that popped an already-visited node.
    pub noops: usize,
}

impl StepStats {
    fn record(&mut self, outcome: StepOutcome) {
        self.steps += 1;
        match outcome {
            StepOutcome::Advanced(_) => self.advanced += 1,
            StepOutcome::NoOp(_) => self.noops += 1,
            StepOutcome::Done => {}
        }
    }
}

/// Per-node view used by [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeState {
    pub id: NodeId,
    pub visited: bool,
    /// `None` when unreached.
    pub distance: Option<u64>,
    pub parent: Option<NodeId>,
}

/// Serializable copy of the whole query surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub mode: RunMode,
    pub status: &'static str,
    pub running: bool,
    pub paused: bool,
    pub step_mode: bool,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    pub current: Option<NodeId>,
    pub visit_order: Vec<NodeId>,
    pub nodes: Vec<NodeState>,
    pub shortest_path: Vec<NodeId>,
    pub path_distance: Option<u64>,
    pub frontier: usize,
    pub stats: StepStats,
}

/// Owns the graph, the overlay, the active traversal and the control flags.
///
/// One scheduler drives one graph. Independent graphs need independent
/// schedulers; nothing is shared between instances.
#[derive(Debug)]
pub struct StepScheduler {
    graph: GraphStore,
    overlay: Overlay,
    active: Option<Box<dyn Traversal>>,
    run_mode: RunMode,
    start: Option<NodeId>,
    end: Option<NodeId>,
    running: bool,
    paused: bool,
    step_mode: bool,
    stats: StepStats,
}

impl StepScheduler {
    pub fn new(graph: GraphStore) -> Self {
        let overlay = Overlay::new(graph.num_nodes());
        Self {
            graph,
            overlay,
            active: None,
            run_mode: RunMode::Idle,
            start: None,
            end: None,
            running: false,
            paused: false,
            step_mode: false,
            stats: StepStats::default(),
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    // ==================== Commands ====================

    /// Start a fresh run of `algorithm` from `start`.
    ///
    /// Any run in progress is discarded. `end` is the Dijkstra target; BFS
    /// and DFS only validate it. Step mode carries over, pause does not.
    pub fn start_run(
        &mut self,
        algorithm: Algorithm,
        start: NodeId,
        end: Option<NodeId>,
    ) -> Result<()> {
        let start = self.graph.check_endpoint("start", start)?;
        let end = end
            .map(|node| self.graph.check_endpoint("end", node))
            .transpose()?;

        self.reset();

        let mut traversal = traversal::create(algorithm, end);
        traversal.start(&mut self.overlay, start);
        self.active = Some(traversal);
        self.run_mode = algorithm.into();
        self.start = Some(start);
        self.end = end;
        self.running = true;

        info!("Started {} from node {}", self.run_mode, start);
        Ok(())
    }

    /// Cadence callback. Steps once only while running, not paused and not
    /// in step mode.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if !self.running || self.paused || self.step_mode {
            return None;
        }
        self.step_once()
    }

    /// Step once on explicit request, regardless of pause or step mode.
    pub fn manual_step(&mut self) -> Option<StepOutcome> {
        if !self.running {
            return None;
        }
        self.step_once()
    }

    /// Manual step that keeps going past no-op pops until something visible
    /// happens. Terminates because every no-op consumes a frontier entry.
    pub fn advance(&mut self) -> Option<StepOutcome> {
        loop {
            let outcome = self.manual_step()?;
            if outcome.is_visible() {
                return Some(outcome);
            }
        }
    }

    /// Enable step mode and perform one manual step.
    pub fn step_key(&mut self) -> Option<StepOutcome> {
        self.set_step_mode(true);
        self.manual_step()
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.running {
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.running {
            self.paused = !self.paused;
            debug!("Paused: {}", self.paused);
        }
    }

    pub fn set_step_mode(&mut self, enabled: bool) {
        self.step_mode = enabled;
    }

    /// Leave step mode and un-pause a running traversal.
    pub fn auto_mode(&mut self) {
        self.step_mode = false;
        if self.running {
            self.paused = false;
        }
    }

    /// Discard the run: clear the overlay, drop the frontier, return to idle.
    /// Step mode is kept.
    pub fn reset(&mut self) {
        if self.run_mode != RunMode::Idle {
            info!("Reset {} run", self.run_mode);
        }
        self.overlay.clear();
        self.active = None;
        self.run_mode = RunMode::Idle;
        self.start = None;
        self.end = None;
        self.running = false;
        self.paused = false;
        self.stats = StepStats::default();
    }

    fn step_once(&mut self) -> Option<StepOutcome> {
        let traversal = self.active.as_mut()?;
        let outcome = traversal.step(&self.graph, &mut self.overlay);
        self.stats.record(outcome);

        if outcome.is_done() {
            self.running = false;
            self.paused = false;
            info!(
                "{} complete: {} visited in {} steps ({} no-op)",
                self.run_mode,
                self.overlay.visit_order().len(),
                self.stats.steps,
                self.stats.noops
            );
        }
        Some(outcome)
    }

    // ==================== Queries ====================

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.overlay.is_visited(node)
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.overlay.current_node()
    }

    /// Meaningful in Dijkstra mode; infinite everywhere otherwise.
    pub fn distance_of(&self, node: NodeId) -> Distance {
        self.overlay.distance_of(node)
    }

    /// Empty unless Dijkstra has completed with a reachable end node.
    pub fn shortest_path(&self) -> &[NodeId] {
        self.overlay.shortest_path()
    }

    pub fn visit_order(&self) -> &[NodeId] {
        self.overlay.visit_order()
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_step_mode(&self) -> bool {
        self.step_mode
    }

    pub fn status(&self) -> TraversalStatus {
        self.active
            .as_ref()
            .map(|t| t.status())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }

    pub fn frontier_len(&self) -> usize {
        self.active.as_ref().map(|t| t.frontier_len()).unwrap_or(0)
    }

    /// Start and end node of the current run.
    pub fn endpoints(&self) -> (Option<NodeId>, Option<NodeId>) {
        (self.start, self.end)
    }

    /// Distance to the end node once a Dijkstra run has completed with a
    /// reachable end.
    pub fn path_distance(&self) -> Option<u64> {
        if self.run_mode != RunMode::Dijkstra || self.running {
            return None;
        }
        self.end
            .and_then(|end| self.overlay.distance_of(end).as_finite())
    }

    /// Status word for display: PAUSED, STEP MODE, RUNNING, DONE or IDLE.
    pub fn status_label(&self) -> &'static str {
        if self.running {
            if self.paused {
                "PAUSED"
            } else if self.step_mode {
                "STEP MODE"
            } else {
                "RUNNING"
            }
        } else if self.run_mode == RunMode::Idle {
            "IDLE"
        } else {
            "DONE"
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let (start, end) = self.endpoints();
        let nodes = self
            .graph
            .nodes()
            .map(|id| NodeState {
                id,
                visited: self.overlay.is_visited(id),
                distance: self.overlay.distance_of(id).as_finite(),
                parent: self.overlay.parent_of(id),
            })
            .collect();

        Snapshot {
            mode: self.run_mode,
            status: self.status_label(),
            running: self.running,
            paused: self.paused,
            step_mode: self.step_mode,
            start,
            end,
            current: self.overlay.current_node(),
            visit_order: self.overlay.visit_order().to_vec(),
            nodes,
            shortest_path: self.overlay.shortest_path().to_vec(),
            path_distance: self.path_distance(),
            frontier: self.frontier_len(),
            stats: self.stats,
        }
    }
}
