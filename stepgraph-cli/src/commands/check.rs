//! Check command - Validate a graph file without running a traversal

use crate::input::load_graph;
use crate::output::{GraphSummary, OutputConfig, Outputter};
use anyhow::{Context, Result};
use std::path::Path;
use stepgraph_core::EdgePolicy;

pub fn run(path: &Path, policy: EdgePolicy, output: &OutputConfig) -> Result<()> {
    let input = load_graph(path)?;
    let (graph, endpoints) = input
        .build(policy)
        .with_context(|| format!("Invalid graph in {}", path.display()))?;

    GraphSummary {
        nodes: graph.num_nodes(),
        edges: graph.edge_count(),
        dropped_edges: graph.dropped_edges(),
        start: endpoints.start,
        end: endpoints.end,
        strict: policy == EdgePolicy::Reject,
    }
    .output(output);

    Ok(())
}
