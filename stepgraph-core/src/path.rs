//! Path Reconstructor: derives the start-to-end node sequence from parent
//! pointers once Dijkstra has exhausted its frontier.

use crate::graph::GraphStore;
use crate::overlay::Overlay;
use crate::types::NodeId;

/// Walk parent pointers back from `end` and return the path in start-to-end
/// order. Empty when `end` was never reached.
pub fn reconstruct(overlay: &Overlay, end: NodeId) -> Vec<NodeId> {
    if !overlay.distance_of(end).is_finite() {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(parent) = overlay.parent_of(current) {
        // Parent chains are acyclic; the bound guards against a corrupted overlay.
        if path.len() > overlay.num_nodes() {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Sum of edge weights along `path`, or `None` if two consecutive nodes are
/// not adjacent.
pub fn path_weight(graph: &GraphStore, path: &[NodeId]) -> Option<u64> {
    path.windows(2)
        .map(|pair| graph.edge_weight(pair[0], pair[1]).map(u64::from))
        .sum()
}

/// Whether the undirected edge `u-v` joins two consecutive path nodes.
pub fn path_has_edge(path: &[NodeId], u: NodeId, v: NodeId) -> bool {
    path.windows(2)
        .any(|pair| (pair[0] == u && pair[1] == v) || (pair[0] == v && pair[1] == u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgePolicy;
    use crate::types::Distance;

    #[test]
    fn test_reconstruct_follows_parents() {
        let mut overlay = Overlay::new(4);
        overlay.set_distance(1, Distance::Finite(0));
        overlay.set_distance(3, Distance::Finite(1));
        overlay.set_distance(2, Distance::Finite(2));
        overlay.set_distance(4, Distance::Finite(3));
        overlay.set_parent(3, 1);
        overlay.set_parent(2, 3);
        overlay.set_parent(4, 2);

        assert_eq!(reconstruct(&overlay, 4), vec![1, 3, 2, 4]);
        assert_eq!(reconstruct(&overlay, 1), vec![1]);
    }

    #[test]
    fn test_reconstruct_unreached_is_empty() {
        let overlay = Overlay::new(3);
        assert!(reconstruct(&overlay, 3).is_empty());
    }

    #[test]
    fn test_path_weight() {
        let graph = GraphStore::build(
            4,
            vec![(1, 2, 4), (1, 3, 1), (3, 2, 1), (2, 4, 1)],
            EdgePolicy::Drop,
        )
        .unwrap();
        assert_eq!(path_weight(&graph, &[1, 3, 2, 4]), Some(3));
        assert_eq!(path_weight(&graph, &[1, 2]), Some(4));
        assert_eq!(path_weight(&graph, &[2]), Some(0));
        assert_eq!(path_weight(&graph, &[1, 4]), None);
    }

    #[test]
    fn test_path_has_edge_either_direction() {
        let path = [1, 3, 2, 4];
        assert!(path_has_edge(&path, 1, 3));
        assert!(path_has_edge(&path, 3, 1));
        assert!(path_has_edge(&path, 4, 2));
        assert!(!path_has_edge(&path, 1, 2));
        assert!(!path_has_edge(&[], 1, 2));
    }
}
