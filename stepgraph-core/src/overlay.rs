//! Per-run mutable state layered over the immutable graph.
//!
//! Every run starts from a fresh overlay. Within a run a visited node is never
//! unmarked, distances only decrease, and a parent pointer only changes while
//! its node is still unvisited.

use crate::types::{Distance, NodeId};

#[derive(Debug, Clone)]
pub struct Overlay {
    visited: Vec<bool>,
    distance: Vec<Distance>,
    parent: Vec<Option<NodeId>>,
    current: Option<NodeId>,
    visit_order: Vec<NodeId>,
    shortest_path: Vec<NodeId>,
}

impl Overlay {
    /// Fresh overlay for nodes `1..=num_nodes`.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            visited: vec![false; num_nodes + 1],
            distance: vec![Distance::Infinite; num_nodes + 1],
            parent: vec![None; num_nodes + 1],
            current: None,
            visit_order: Vec::with_capacity(num_nodes),
            shortest_path: Vec::new(),
        }
    }

    /// Return every field to its initial value.
    pub fn clear(&mut self) {
        self.visited.fill(false);
        self.distance.fill(Distance::Infinite);
        self.parent.fill(None);
        self.current = None;
        self.visit_order.clear();
        self.shortest_path.clear();
    }

    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Mark `node` visited. Returns `false` if it already was.
    pub(crate) fn mark_visited(&mut self, node: NodeId) -> bool {
        match self.visited.get_mut(node) {
            Some(slot) if !*slot => {
                *slot = true;
                self.visit_order.push(node);
                true
            }
            _ => false,
        }
    }

    pub fn distance_of(&self, node: NodeId) -> Distance {
        self.distance.get(node).copied().unwrap_or(Distance::Infinite)
    }

    pub(crate) fn set_distance(&mut self, node: NodeId, distance: Distance) {
        if let Some(slot) = self.distance.get_mut(node) {
            *slot = distance;
        }
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node).copied().flatten()
    }

    pub(crate) fn set_parent(&mut self, node: NodeId, parent: NodeId) {
        if let Some(slot) = self.parent.get_mut(node) {
            *slot = Some(parent);
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    pub(crate) fn set_current(&mut self, node: Option<NodeId>) {
        self.current = node;
    }

    /// Nodes in the order they became visited.
    pub fn visit_order(&self) -> &[NodeId] {
        &self.visit_order
    }

    pub fn shortest_path(&self) -> &[NodeId] {
        &self.shortest_path
    }

    pub(crate) fn set_shortest_path(&mut self, path: Vec<NodeId>) {
        self.shortest_path = path;
    }

    /// Number of node slots (the graph's node count).
    pub fn num_nodes(&self) -> usize {
        self.visited.len().saturating_sub(1)
    }
}
