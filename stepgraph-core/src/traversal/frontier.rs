//! Frontier data structures.
//!
//! The frontier decides traversal order:
//!
//! - [`Queue`] -> FIFO -> breadth-first
//! - [`Stack`] -> LIFO -> depth-first
//! - [`MinQueue`] -> smallest `(distance, node)` first -> Dijkstra

use crate::types::NodeId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Frontier of discovered-but-unprocessed nodes for unweighted search.
pub trait Frontier: Default + std::fmt::Debug + Send {
    /// Push a single node.
    fn push(&mut self, node: NodeId);

    /// Remove and return the next node to process.
    fn pop(&mut self) -> Option<NodeId>;

    /// Number of entries, duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Push the discovered neighbors of an expanded node so that they are
    /// popped in adjacency order relative to each other.
    fn push_expansion<I>(&mut self, neighbors: I)
    where
        I: DoubleEndedIterator<Item = NodeId>;
}

/// FIFO queue of node ids.
#[derive(Debug, Default)]
pub struct Queue(VecDeque<NodeId>);

impl Frontier for Queue {
    fn push(&mut self, node: NodeId) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn push_expansion<I>(&mut self, neighbors: I)
    where
        I: DoubleEndedIterator<Item = NodeId>,
    {
        self.0.extend(neighbors);
    }
}

/// LIFO stack of node ids.
#[derive(Debug, Default)]
pub struct Stack(Vec<NodeId>);

impl Frontier for Stack {
    fn push(&mut self, node: NodeId) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    // Reversed so the first neighbor in adjacency order sits on top.
    fn push_expansion<I>(&mut self, neighbors: I)
    where
        I: DoubleEndedIterator<Item = NodeId>,
    {
        self.0.extend(neighbors.rev());
    }
}

/// Min-priority queue keyed by `(distance, node)`.
///
/// Ties on distance pop the smaller node id first.
#[derive(Debug, Default)]
pub struct MinQueue(BinaryHeap<Reverse<(u64, NodeId)>>);

impl MinQueue {
    pub fn push(&mut self, distance: u64, node: NodeId) {
        self.0.push(Reverse((distance, node)));
    }

    pub fn pop(&mut self) -> Option<(u64, NodeId)> {
        self.0.pop().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_expansion_order() {
        let mut queue = Queue::default();
        queue.push(1);
        queue.push_expansion([2, 3, 4].into_iter());
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(4));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_stack_pops_expansion_in_adjacency_order() {
        let mut stack = Stack::default();
        stack.push(9);
        stack.push_expansion([2, 3, 4].into_iter());
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(4));
        assert_eq!(stack.pop(), Some(9));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_min_queue_ordering_and_ties() {
        let mut heap = MinQueue::default();
        heap.push(5, 1);
        heap.push(2, 7);
        heap.push(2, 3);
        heap.push(0, 9);
        assert_eq!(heap.pop(), Some((0, 9)));
        assert_eq!(heap.pop(), Some((2, 3)));
        assert_eq!(heap.pop(), Some((2, 7)));
        assert_eq!(heap.pop(), Some((5, 1)));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_clear() {
        let mut queue = Queue::default();
        queue.push(1);
        queue.clear();
        assert!(queue.is_empty());

        let mut heap = MinQueue::default();
        heap.push(1, 1);
        heap.clear();
        assert!(heap.is_empty());
    }
}
