//! Shared value types for graphs, runs and step results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node identifier. Valid ids are `1..=num_nodes`.
pub type NodeId = usize;

/// Non-negative edge weight.
pub type Weight = u32;

/// Largest node count a graph may declare.
pub const MAX_NODES: usize = 20;

/// Tentative or final distance from the start node.
///
/// `Infinite` orders after every finite value, so comparisons read the same
/// way the relaxation rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Distance {
    Finite(u64),
    #[default]
    Infinite,
}

impl Distance {
    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, or `None` when unreached.
    pub fn as_finite(self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    /// Distance after following an edge of weight `w`.
    pub fn extend(self, w: Weight) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d + u64::from(w)),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Traversal algorithm a run can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            _ => Err(format!("Unknown algorithm: '{}'", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RunMode::from(*self).fmt(f)
    }
}

/// Which traversal is active. Only one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Idle,
    Bfs,
    Dfs,
    Dijkstra,
}

impl RunMode {
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            RunMode::Idle => None,
            RunMode::Bfs => Some(Algorithm::Bfs),
            RunMode::Dfs => Some(Algorithm::Dfs),
            RunMode::Dijkstra => Some(Algorithm::Dijkstra),
        }
    }
}

impl From<Algorithm> for RunMode {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bfs => RunMode::Bfs,
            Algorithm::Dfs => RunMode::Dfs,
            Algorithm::Dijkstra => RunMode::Dijkstra,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunMode::Idle => "NONE",
            RunMode::Bfs => "BFS",
            RunMode::Dfs => "DFS",
            RunMode::Dijkstra => "DIJKSTRA",
        };
        f.write_str(label)
    }
}

/// Result of a single `step()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "node", rename_all = "lowercase")]
pub enum StepOutcome {
    /// A node was newly marked visited and expanded.
    Advanced(NodeId),
    /// The popped node was already visited; only `current_node` changed.
    /// Callers should simply step again.
    NoOp(NodeId),
    /// The frontier was empty; the traversal is exhausted.
    Done,
}

impl StepOutcome {
    pub fn is_done(self) -> bool {
        matches!(self, StepOutcome::Done)
    }

    /// Whether the step changed anything beyond `current_node`.
    pub fn is_visible(self) -> bool {
        !matches!(self, StepOutcome::NoOp(_))
    }
}

/// Lifecycle of a single traversal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalStatus {
    #[default]
    Idle,
    Running,
    Exhausted,
}
