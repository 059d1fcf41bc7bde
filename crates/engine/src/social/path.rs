//! Shortest path and bounded path counting over FRIEND edges.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use socnet_core::{Direction, EdgeKind, NodeId, SocnetResult};
use socnet_storage::GraphRead;

/// Unweighted shortest-path search bounded by a hop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    max_depth: usize,
}

impl PathFinder {
    /// A finder accepting paths of at most `max_depth` hops.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Hop bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Shortest path from `from` to `to`, both endpoints included.
    ///
    /// Among equally short paths the first one discovered wins. Returns an
    /// empty path when `to` is not reachable within the bound, and `[from]`
    /// when the endpoints coincide.
    pub fn find<R: GraphRead + ?Sized>(
        &self,
        reader: &R,
        from: NodeId,
        to: NodeId,
    ) -> SocnetResult<Vec<NodeId>> {
        if from == to {
            return Ok(if reader.contains_node(from) {
                vec![from]
            } else {
                Vec::new()
            });
        }

        let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
        seen.insert(from);
        queue.push_back((from, 0));

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= self.max_depth {
                continue;
            }
            for edge in reader.edges_of(node, EdgeKind::Friend, Direction::Both)? {
                let Some(next) = edge.other_endpoint(node) else {
                    continue;
                };
                if !seen.insert(next) {
                    continue;
                }
                parent.insert(next, node);
                if next == to {
                    return Ok(walk_back(&parent, from, to));
                }
                queue.push_back((next, depth + 1));
            }
        }
        Ok(Vec::new())
    }
}

fn walk_back(parent: &FxHashMap<NodeId, NodeId>, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        match parent.get(&cur) {
            Some(&p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Counts simple paths between two nodes up to a hop bound.
///
/// Used as the recommendation signal: more short paths means a closer
/// connection. Enumeration is exhaustive, so keep the bound small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCounter {
    max_length: usize,
}

impl PathCounter {
    /// A counter for paths of at most `max_length` hops.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Hop bound.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of distinct simple paths of 1..=`max_length` hops from `from`
    /// to `to`. Zero when the endpoints coincide.
    pub fn count<R: GraphRead + ?Sized>(
        &self,
        reader: &R,
        from: NodeId,
        to: NodeId,
    ) -> SocnetResult<usize> {
        if from == to || self.max_length == 0 {
            return Ok(0);
        }
        let mut on_path = FxHashSet::default();
        on_path.insert(from);
        count_from(reader, from, to, self.max_length, &mut on_path)
    }
}

fn count_from<R: GraphRead + ?Sized>(
    reader: &R,
    node: NodeId,
    target: NodeId,
    remaining: usize,
    on_path: &mut FxHashSet<NodeId>,
) -> SocnetResult<usize> {
    let mut total = 0;
    for edge in reader.edges_of(node, EdgeKind::Friend, Direction::Both)? {
        let Some(next) = edge.other_endpoint(node) else {
            continue;
        };
        if next == target {
            total += 1;
            continue;
        }
        if remaining > 1 && on_path.insert(next) {
            total += count_from(reader, next, target, remaining - 1, on_path)?;
            on_path.remove(&next);
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_storage::{GraphStore, GraphWrite, MemoryGraphStore};

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

    // =========================================================================
    // PathFinder
    // =========================================================================

    #[test]
    fn chain_path_within_bound() {
        let (store, n) = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(PathFinder::new(4).find(&store, n[0], n[4]).unwrap(), n);
    }

    #[test]
    fn chain_path_beyond_bound_is_empty() {
        let (store, n) = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert!(PathFinder::new(3).find(&store, n[0], n[4]).unwrap().is_empty());
    }

    #[test]
    fn shortcut_wins() {
        let (store, n) = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(
            PathFinder::new(5).find(&store, n[0], n[3]).unwrap(),
            vec![n[0], n[3]]
        );
    }

    #[test]
    fn first_discovered_among_equals() {
        let (store, n) = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(
            PathFinder::new(2).find(&store, n[0], n[3]).unwrap(),
            vec![n[0], n[1], n[3]]
        );
    }

    #[test]
    fn same_endpoint_path() {
        let (store, n) = graph(1, &[]);
        assert_eq!(PathFinder::new(1).find(&store, n[0], n[0]).unwrap(), vec![n[0]]);
    }

    #[test]
    fn disconnected_is_empty() {
        let (store, n) = graph(3, &[(0, 1)]);
        assert!(PathFinder::new(6).find(&store, n[0], n[2]).unwrap().is_empty());
    }

    // =========================================================================
    // PathCounter
    // =========================================================================

    #[test]
    fn triangle_has_two_paths() {
        let (store, n) = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(PathCounter::new(2).count(&store, n[0], n[1]).unwrap(), 2);
        assert_eq!(PathCounter::new(1).count(&store, n[0], n[1]).unwrap(), 1);
    }

    #[test]
    fn counts_each_mutual_friend() {
        // 0 and 4 share friends 1, 2 and 3
        let (store, n) = graph(5, &[(0, 1), (0, 2), (0, 3), (1, 4), (2, 4), (3, 4)]);
        assert_eq!(PathCounter::new(2).count(&store, n[0], n[4]).unwrap(), 3);
    }

    #[test]
    fn longer_paths_ignored() {
        let (store, n) = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(PathCounter::new(2).count(&store, n[0], n[3]).unwrap(), 0);
        assert_eq!(PathCounter::new(3).count(&store, n[0], n[3]).unwrap(), 1);
    }

    #[test]
    fn self_count_is_zero() {
        let (store, n) = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(PathCounter::new(2).count(&store, n[0], n[0]).unwrap(), 0);
    }

    #[test]
    fn dense_cycle_terminates() {
        let links: Vec<(usize, usize)> = (0..6)
            .flat_map(|a| (a + 1..6).map(move |b| (a, b)))
            .collect();
        let (store, n) = graph(6, &links);
        // K6: one direct path plus one through each of the other four nodes
        assert_eq!(PathCounter::new(2).count(&store, n[0], n[5]).unwrap(), 5);
    }
}
