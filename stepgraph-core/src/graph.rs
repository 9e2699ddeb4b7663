//! Graph Store: the fixed, undirected, weighted adjacency structure.
//!
//! A graph is built once from a node count and an edge list and never changes
//! afterwards. Adjacency lists keep insertion order because that order decides
//! BFS/DFS visitation order and tie-breaking in Dijkstra relaxation.
//!
//! # Input format
//!
//! [`GraphInput`] carries the same fields as the interactive prompts and
//! deserializes from TOML or JSON:
//!
//! ```toml
//! nodes = 4
//! start = 1
//! end = 4
//! edges = [[1, 2, 4], [1, 3, 1], [3, 2, 1], [2, 4, 1]]
//! ```

use crate::error::{GraphError, Result};
use crate::types::{NodeId, Weight, MAX_NODES};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with an edge whose endpoint lies outside `1..=num_nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Silently drop the edge (counted in [`GraphStore::dropped_edges`]).
    #[default]
    Drop,
    /// Fail construction with [`GraphError::InvalidEdge`].
    Reject,
}

/// An undirected edge `(u, v, weight)` as given by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeInput(pub NodeId, pub NodeId, pub Weight);

impl From<(NodeId, NodeId, Weight)> for EdgeInput {
    fn from((u, v, w): (NodeId, NodeId, Weight)) -> Self {
        EdgeInput(u, v, w)
    }
}

/// Validated start and end nodes of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub start: NodeId,
    pub end: NodeId,
}

/// Raw graph description: node count, edges and the two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    /// Number of nodes; ids run from 1 to `nodes`.
    pub nodes: usize,
    /// Edge list in insertion order.
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
    /// Start node for every traversal.
    pub start: NodeId,
    /// Target node for Dijkstra path reconstruction.
    pub end: NodeId,
}

impl GraphInput {
    pub fn new(
        nodes: usize,
        edges: Vec<(NodeId, NodeId, Weight)>,
        start: NodeId,
        end: NodeId,
    ) -> Self {
        Self {
            nodes,
            edges: edges.into_iter().map(EdgeInput::from).collect(),
            start,
            end,
        }
    }

    /// Validate everything and build the graph.
    ///
    /// Checks run in prompt order: node count, edges, start node, end node.
    pub fn build(&self, policy: EdgePolicy) -> Result<(GraphStore, Endpoints)> {
        let graph = GraphStore::build(
            self.nodes,
            self.edges.iter().map(|e| (e.0, e.1, e.2)),
            policy,
        )?;
        let start = graph.check_endpoint("start", self.start)?;
        let end = graph.check_endpoint("end", self.end)?;
        Ok((graph, Endpoints { start, end }))
    }
}

/// Immutable adjacency structure for up to [`MAX_NODES`] nodes.
#[derive(Debug, Clone)]
pub struct GraphStore {
    num_nodes: usize,
    /// Indexed by node id; slot 0 is unused.
    adjacency: Vec<Vec<(NodeId, Weight)>>,
    /// Accepted edges, normalized to `u <= v`, in insertion order.
    edges: Vec<(NodeId, NodeId, Weight)>,
    dropped: usize,
}

impl GraphStore {
    /// Build a graph from a node count and an edge list.
    ///
    /// Inserting `(u, v, w)` appends `v` to `u`'s list and `u` to `v`'s list.
    pub fn build<I>(num_nodes: usize, edges: I, policy: EdgePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Weight)>,
    {
        if !(1..=MAX_NODES).contains(&num_nodes) {
            return Err(GraphError::InvalidNodeCount { count: num_nodes });
        }

        let mut graph = GraphStore {
            num_nodes,
            adjacency: vec![Vec::new(); num_nodes + 1],
            edges: Vec::new(),
            dropped: 0,
        };

        for (u, v, w) in edges {
            if !graph.contains(u) || !graph.contains(v) {
                match policy {
                    EdgePolicy::Drop => {
                        warn!("Dropping edge ({}, {}) outside 1..={}", u, v, num_nodes);
                        graph.dropped += 1;
                        continue;
                    }
                    EdgePolicy::Reject => {
                        return Err(GraphError::InvalidEdge { u, v, num_nodes });
                    }
                }
            }

            graph.adjacency[u].push((v, w));
            graph.adjacency[v].push((u, w));
            graph.edges.push((u.min(v), u.max(v), w));
        }

        debug!(
            "Graph built: {} nodes, {} edges, {} dropped",
            graph.num_nodes,
            graph.edges.len(),
            graph.dropped
        );

        Ok(graph)
    }

    /// Number of nodes; ids run from 1 to this value.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of accepted (undirected) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges discarded under [`EdgePolicy::Drop`].
    pub fn dropped_edges(&self) -> usize {
        self.dropped
    }

    /// Whether `node` is a valid id for this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        (1..=self.num_nodes).contains(&node)
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        1..=self.num_nodes
    }

    /// Neighbors of `node` with edge weights, in insertion order.
    ///
    /// Unknown nodes have no neighbors.
    pub fn neighbors_of(&self, node: NodeId) -> &[(NodeId, Weight)] {
        if self.contains(node) {
            &self.adjacency[node]
        } else {
            &[]
        }
    }

    /// Every edge once, as `(u, v, weight)` with `u <= v`, in insertion order.
    pub fn edges(&self) -> &[(NodeId, NodeId, Weight)] {
        &self.edges
    }

    /// Cheapest weight among the edges joining `u` and `v`, if any.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        self.neighbors_of(u)
            .iter()
            .filter(|(n, _)| *n == v)
            .map(|(_, w)| *w)
            .min()
    }

    /// Validate a start/end node against this graph.
    pub fn check_endpoint(&self, role: &'static str, node: NodeId) -> Result<NodeId> {
        if self.contains(node) {
            Ok(node)
        } else {
            Err(GraphError::InvalidEndpoint {
                role,
                node,
                num_nodes: self.num_nodes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_graph() -> GraphStore {
        GraphStore::build(
            4,
            vec![(1, 2, 4), (1, 3, 1), (3, 2, 1), (2, 4, 1)],
            EdgePolicy::Drop,
        )
        .unwrap()
    }

    #[test]
    fn test_node_count_bounds() {
        assert_eq!(
            GraphStore::build(0, vec![], EdgePolicy::Drop).unwrap_err(),
            GraphError::InvalidNodeCount { count: 0 }
        );
        assert_eq!(
            GraphStore::build(21, vec![], EdgePolicy::Drop).unwrap_err(),
            GraphError::InvalidNodeCount { count: 21 }
        );
        assert!(GraphStore::build(1, vec![], EdgePolicy::Drop).is_ok());
        assert!(GraphStore::build(20, vec![], EdgePolicy::Drop).is_ok());
    }

    #[test]
    fn test_undirected_insertion_order() {
        let graph = create_test_graph();
        assert_eq!(graph.neighbors_of(1), &[(2, 4), (3, 1)]);
        assert_eq!(graph.neighbors_of(2), &[(1, 4), (3, 1), (4, 1)]);
        assert_eq!(graph.neighbors_of(3), &[(1, 1), (2, 1)]);
        assert_eq!(graph.neighbors_of(4), &[(2, 1)]);
        assert!(graph.neighbors_of(0).is_empty());
        assert!(graph.neighbors_of(5).is_empty());
    }

    #[test]
    fn test_out_of_range_edges_dropped() {
        let graph = GraphStore::build(3, vec![(1, 2, 1), (0, 1, 1), (2, 4, 1)], EdgePolicy::Drop)
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.dropped_edges(), 2);
        assert_eq!(graph.neighbors_of(2), &[(1, 1)]);
    }

    #[test]
    fn test_out_of_range_edges_rejected() {
        let err = GraphStore::build(3, vec![(1, 2, 1), (2, 4, 1)], EdgePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidEdge {
                u: 2,
                v: 4,
                num_nodes: 3
            }
        );
    }

    #[test]
    fn test_edges_listed_once_normalized() {
        let graph = create_test_graph();
        assert_eq!(graph.edges(), &[(1, 2, 4), (1, 3, 1), (2, 3, 1), (2, 4, 1)]);
    }

    #[test]
    fn test_edge_weight_prefers_cheapest_parallel_edge() {
        let graph =
            GraphStore::build(2, vec![(1, 2, 5), (2, 1, 2)], EdgePolicy::Drop).unwrap();
        assert_eq!(graph.edge_weight(1, 2), Some(2));
        assert_eq!(graph.edge_weight(2, 1), Some(2));
        assert_eq!(graph.edge_weight(1, 1), None);
    }

    #[test]
    fn test_self_loop_listed_twice() {
        let graph = GraphStore::build(1, vec![(1, 1, 3)], EdgePolicy::Drop).unwrap();
        assert_eq!(graph.neighbors_of(1), &[(1, 3), (1, 3)]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_input_build_validates_endpoints() {
        let input = GraphInput::new(3, vec![(1, 2, 1)], 1, 3);
        let (graph, endpoints) = input.build(EdgePolicy::Drop).unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(endpoints, Endpoints { start: 1, end: 3 });

        let input = GraphInput::new(3, vec![], 4, 1);
        assert_eq!(
            input.build(EdgePolicy::Drop).unwrap_err(),
            GraphError::InvalidEndpoint {
                role: "start",
                node: 4,
                num_nodes: 3
            }
        );

        let input = GraphInput::new(3, vec![], 1, 0);
        assert!(matches!(
            input.build(EdgePolicy::Drop),
            Err(GraphError::InvalidEndpoint { role: "end", .. })
        ));
    }

    #[test]
    fn test_input_deserialize_json() {
        let json = r#"{"nodes": 3, "start": 1, "end": 3, "edges": [[1, 2, 1], [2, 3, 1]]}"#;
        let input: GraphInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, GraphInput::new(3, vec![(1, 2, 1), (2, 3, 1)], 1, 3));
    }

    #[test]
    fn test_input_rejects_negative_weight() {
        let json = r#"{"nodes": 2, "start": 1, "end": 2, "edges": [[1, 2, -1]]}"#;
        assert!(serde_json::from_str::<GraphInput>(json).is_err());
    }
}
