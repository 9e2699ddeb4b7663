//! Run command - Drive one traversal to completion on a fixed cadence
//!
//! Steps come from a tokio interval, exactly as auto mode does in an
//! interactive session. With `--trace` every visible step is printed as it
//! happens; the final state is printed once the traversal is exhausted.

use crate::input::load_graph;
use crate::output::{OutputConfig, Outputter, RunView, StepLine};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use stepgraph_core::{Algorithm, EdgePolicy, NodeId, StepScheduler};
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Options for a single non-interactive run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub algorithm: Algorithm,
    /// Overrides the start node from the graph file.
    pub start: Option<NodeId>,
    /// Overrides the end node from the graph file.
    pub end: Option<NodeId>,
    pub interval: Duration,
    pub policy: EdgePolicy,
    pub trace: bool,
}

pub async fn run(path: &Path, options: RunOptions, output: &OutputConfig) -> Result<()> {
    let input = load_graph(path)?;
    let (graph, endpoints) = input
        .build(options.policy)
        .with_context(|| format!("Invalid graph in {}", path.display()))?;

    let start = options.start.unwrap_or(endpoints.start);
    let end = options.end.unwrap_or(endpoints.end);

    let mut scheduler = StepScheduler::new(graph);
    scheduler.start_run(options.algorithm, start, Some(end))?;

    // Trace lines and the final view share stdout; in JSON mode each is one line.
    let line_config = output.streaming();

    let mut ticker = time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while scheduler.is_running() {
        ticker.tick().await;
        let Some(outcome) = scheduler.tick() else {
            continue;
        };
        debug!("Tick: {:?}", outcome);
        if options.trace && outcome.is_visible() && !outcome.is_done() {
            StepLine::new(&scheduler, outcome).output(&line_config);
        }
    }

    let view = RunView::capture(&scheduler);
    view.output(if options.trace { &line_config } else { output });

    Ok(())
}
