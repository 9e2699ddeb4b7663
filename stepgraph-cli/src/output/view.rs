//! Renderable views over the scheduler state.

use super::{OutputConfig, Outputter, TableOutput};
use colored::Colorize;
use serde::Serialize;
use stepgraph_core::path::path_has_edge;
use stepgraph_core::{NodeId, RunMode, Snapshot, StepOutcome, StepScheduler, Weight};

const CONTROLS: &str = "[B] BFS | [D] DFS | [J] Dijkstra | [SPACE] Pause | [S] Step | [A] Auto | [R] Reset | [Q] Quit";

/// One edge of the graph as drawn, with its shortest-path membership.
#[derive(Debug, Serialize)]
pub struct EdgeView {
    pub u: NodeId,
    pub v: NodeId,
    pub weight: Weight,
    pub on_path: bool,
}

/// Full picture of a run: status line, node states, edges, path.
#[derive(Debug, Serialize)]
pub struct RunView {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub edges: Vec<EdgeView>,
    #[serde(skip)]
    pub show_controls: bool,
}

impl RunView {
    pub fn capture(scheduler: &StepScheduler) -> Self {
        let snapshot = scheduler.snapshot();
        let edges = scheduler
            .graph()
            .edges()
            .iter()
            .map(|&(u, v, weight)| EdgeView {
                u,
                v,
                weight,
                on_path: path_has_edge(&snapshot.shortest_path, u, v),
            })
            .collect();

        Self {
            snapshot,
            edges,
            show_controls: false,
        }
    }

    pub fn with_controls(mut self) -> Self {
        self.show_controls = true;
        self
    }

    fn status_line(&self) -> String {
        let status = match self.snapshot.status {
            "RUNNING" => self.snapshot.status.green().bold(),
            "PAUSED" | "STEP MODE" => self.snapshot.status.yellow().bold(),
            "DONE" => self.snapshot.status.cyan().bold(),
            other => other.normal(),
        };
        let mut line = format!("Mode: {} | Status: {}", self.snapshot.mode, status);
        if self.show_controls {
            line.push_str(" | ");
            line.push_str(&CONTROLS.dimmed().to_string());
        }
        line
    }

    fn node_rows(&self) -> Vec<Vec<String>> {
        let dijkstra = self.snapshot.mode == RunMode::Dijkstra;
        self.snapshot
            .nodes
            .iter()
            .map(|node| {
                let marker = if self.snapshot.current == Some(node.id) {
                    "<".bold().to_string()
                } else {
                    String::new()
                };
                let visited = if node.visited {
                    "yes".green().to_string()
                } else {
                    "no".dimmed().to_string()
                };
                // Distances are only meaningful for Dijkstra.
                let distance = match node.distance {
                    Some(d) if dijkstra && node.visited => format!("d:{}", d),
                    _ => "-".to_string(),
                };
                let parent = node
                    .parent
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                vec![node.id.to_string(), marker, visited, distance, parent]
            })
            .collect()
    }

    fn edge_rows(&self) -> Vec<Vec<String>> {
        self.edges
            .iter()
            .map(|edge| {
                let label = format!("{}-{}", edge.u, edge.v);
                let on_path = if edge.on_path {
                    "*".yellow().bold().to_string()
                } else {
                    String::new()
                };
                vec![label, edge.weight.to_string(), on_path]
            })
            .collect()
    }
}

fn join_nodes(nodes: &[NodeId], sep: &str) -> String {
    nodes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl Outputter for RunView {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut out = vec![self.status_line()];

        out.push(TableOutput::from_rows(
            &["Node", "Current", "Visited", "Distance", "Parent"],
            &self.node_rows(),
            3,
            config,
        ));
        out.push(TableOutput::from_rows(
            &["Edge", "Weight", "Path"],
            &self.edge_rows(),
            1,
            config,
        ));

        if !self.snapshot.visit_order.is_empty() {
            out.push(format!(
                "Visited: {}",
                join_nodes(&self.snapshot.visit_order, ", ")
            ));
        }
        if !self.snapshot.shortest_path.is_empty() {
            out.push(format!(
                "Path: {}",
                join_nodes(&self.snapshot.shortest_path, " -> ")
            ));
        }
        if let (Some(start), Some(end), Some(distance)) = (
            self.snapshot.start,
            self.snapshot.end,
            self.snapshot.path_distance,
        ) {
            out.push(
                format!("Shortest distance from {} to {}: {}", start, end, distance)
                    .bold()
                    .to_string(),
            );
        }

        out.join("\n")
    }
}

/// A single traced step.
#[derive(Debug, Serialize)]
pub struct StepLine {
    pub step: usize,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub frontier: usize,
}

impl StepLine {
    pub fn new(scheduler: &StepScheduler, outcome: StepOutcome) -> Self {
        Self {
            step: scheduler.stats().steps,
            outcome,
            frontier: scheduler.frontier_len(),
        }
    }
}

impl Outputter for StepLine {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let what = match self.outcome {
            StepOutcome::Advanced(node) => format!("visited {}", node.to_string().green()),
            StepOutcome::NoOp(node) => format!("skipped {} (already visited)", node),
            StepOutcome::Done => "done".cyan().to_string(),
        };
        format!("step {}: {} (frontier {})", self.step, what, self.frontier)
    }
}

/// Key reference for interactive sessions.
#[derive(Debug, Serialize)]
pub struct HelpText {
    pub help: &'static str,
}

impl HelpText {
    pub fn new(help: &'static str) -> Self {
        Self { help }
    }
}

impl Outputter for HelpText {
    fn to_table(&self, _config: &OutputConfig) -> String {
        self.help.to_string()
    }
}

/// Result of validating a graph file.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub dropped_edges: usize,
    pub start: NodeId,
    pub end: NodeId,
    pub strict: bool,
}

impl Outputter for GraphSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let dropped = if self.dropped_edges > 0 {
            self.dropped_edges.to_string().yellow().to_string()
        } else {
            "0".to_string()
        };
        let pairs = vec![
            ("Nodes", self.nodes.to_string()),
            ("Edges", self.edges.to_string()),
            ("Dropped edges", dropped),
            ("Start", self.start.to_string()),
            ("End", self.end.to_string()),
            (
                "Edge policy",
                if self.strict { "reject" } else { "drop" }.to_string(),
            ),
        ];
        TableOutput::format_key_value(&pairs, config)
    }
}
