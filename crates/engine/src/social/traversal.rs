//! Bounded breadth-first exploration over FRIEND edges.
//!
//! Every node is visited at most once per traversal (global uniqueness), so
//! the walk terminates on cyclic graphs and each reachable node is reported
//! at its shortest distance from the start.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use rustc_hash::FxHashSet;

use socnet_core::{Direction, EdgeKind, NodeId, SocnetError, SocnetResult};
use socnet_storage::GraphRead;

/// A node reached by a traversal and the hop count at which it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraversalStep {
    /// Node reached.
    pub node: NodeId,
    /// Hops from the start node, at least 1.
    pub depth: usize,
}

/// Lazy BFS yielding every node within `max_depth` hops of the start.
///
/// The start node itself is never yielded. Nodes come out in first-discovery
/// order. A node's FRIEND edges are read only when the node is dequeued, and
/// nodes at `max_depth` are never expanded. After a store error the iterator
/// yields that error once and then ends.
pub struct FriendsWithinDepth<R> {
    reader: R,
    start: NodeId,
    max_depth: usize,
    queue: VecDeque<(NodeId, usize)>,
    seen: FxHashSet<NodeId>,
    failed: bool,
}

impl<R: GraphRead> FriendsWithinDepth<R> {
    /// Start a traversal. A zero depth yields nothing.
    pub fn new(reader: R, start: NodeId, max_depth: usize) -> Self {
        let mut queue = VecDeque::new();
        let mut seen = FxHashSet::default();
        if max_depth > 0 {
            queue.push_back((start, 0));
            seen.insert(start);
        }
        Self {
            reader,
            start,
            max_depth,
            queue,
            seen,
            failed: false,
        }
    }

    /// The node the traversal started from.
    pub fn start(&self) -> NodeId {
        self.start
    }

    fn expand(&mut self, node: NodeId, depth: usize) -> SocnetResult<()> {
        for edge in self.reader.edges_of(node, EdgeKind::Friend, Direction::Both)? {
            let next = edge.other_endpoint(node).ok_or_else(|| {
                SocnetError::store_failure(format!("edge {} does not touch {}", edge.id, node))
            })?;
            if self.seen.insert(next) {
                self.queue.push_back((next, depth + 1));
            }
        }
        Ok(())
    }
}

impl<R: GraphRead> Iterator for FriendsWithinDepth<R> {
    type Item = SocnetResult<TraversalStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while let Some((node, depth)) = self.queue.pop_front() {
            if depth < self.max_depth {
                if let Err(e) = self.expand(node, depth) {
                    self.failed = true;
                    self.queue.clear();
                    return Some(Err(e));
                }
            }
            if node != self.start {
                return Some(Ok(TraversalStep { node, depth }));
            }
        }
        None
    }
}

impl<R: GraphRead> FusedIterator for FriendsWithinDepth<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_storage::{GraphStore, GraphWrite, MemoryGraphStore};

    /// Builds `n` nodes and FRIEND edges between the given index pairs.
    fn graph(n: usize, links: &[(usize, usize)]) -> (MemoryGraphStore, Vec<NodeId>) {
        let store = MemoryGraphStore::new();
        let nodes = store
            .run_atomic(|txn| {
                let nodes: Vec<NodeId> = (0..n).map(|_| txn.create_node()).collect::<Result<_, _>>()?;
                for &(a, b) in links {
                    txn.create_edge(nodes[a], nodes[b], EdgeKind::Friend)?;
                }
                Ok(nodes)
            })
            .unwrap();
        (store, nodes)
    }

    fn collect(store: &MemoryGraphStore, start: NodeId, depth: usize) -> Vec<TraversalStep> {
        FriendsWithinDepth::new(store, start, depth)
            .collect::<SocnetResult<_>>()
            .unwrap()
    }

    // =========================================================================
    // Depth bounds
    // =========================================================================

    #[test]
    fn depth_one_is_direct_friends() {
        let (store, n) = graph(4, &[(0, 1), (2, 0), (1, 3)]);
        let steps = collect(&store, n[0], 1);
        let nodes: Vec<_> = steps.iter().map(|s| s.node).collect();
        assert_eq!(nodes, vec![n[1], n[2]]);
        assert!(steps.iter().all(|s| s.depth == 1));
    }

    #[test]
    fn depth_two_is_cumulative() {
        let (store, n) = graph(4, &[(0, 1), (2, 0), (1, 3)]);
        let steps = collect(&store, n[0], 2);
        assert_eq!(
            steps,
            vec![
                TraversalStep { node: n[1], depth: 1 },
                TraversalStep { node: n[2], depth: 1 },
                TraversalStep { node: n[3], depth: 2 },
            ]
        );
    }

    #[test]
    fn zero_depth_yields_nothing() {
        let (store, n) = graph(2, &[(0, 1)]);
        assert!(collect(&store, n[0], 0).is_empty());
    }

    #[test]
    fn chain_stops_at_bound() {
        let (store, n) = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let far: Vec<_> = collect(&store, n[0], 3).into_iter().map(|s| s.node).collect();
        assert_eq!(far, vec![n[1], n[2], n[3]]);
    }

    // =========================================================================
    // Uniqueness and cycles
    // =========================================================================

    #[test]
    fn cycle_terminates_without_duplicates() {
        let (store, n) = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let steps = collect(&store, n[0], 10);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.node != n[0] && s.depth == 1));
    }

    #[test]
    fn diamond_reports_shortest_depth_once() {
        let (store, n) = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let steps = collect(&store, n[0], 3);
        let hits: Vec<_> = steps.iter().filter(|s| s.node == n[3]).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].depth, 2);
    }

    #[test]
    fn missing_start_yields_nothing() {
        let (store, n) = graph(2, &[(0, 1)]);
        store.run_atomic(|txn| txn.delete_node(n[0])).unwrap();
        assert!(collect(&store, n[0], 2).is_empty());
    }

    #[test]
    fn other_edge_kinds_are_not_followed() {
        let (store, n) = graph(3, &[(0, 1)]);
        store
            .run_atomic(|txn| txn.create_edge(n[0], n[2], EdgeKind::Status))
            .unwrap();
        assert_eq!(collect(&store, n[0], 2).len(), 1);
    }

    #[test]
    fn works_over_owned_arc_reader() {
        let (store, n) = graph(2, &[(0, 1)]);
        let store = std::sync::Arc::new(store);
        let iter = FriendsWithinDepth::new(std::sync::Arc::clone(&store), n[0], 1);
        assert_eq!(iter.start(), n[0]);
        assert_eq!(iter.count(), 1);
    }
}
